//! Deal CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{
    contact_queries::CHECK_CONTACT_EXISTS_SQL,
    utils::{date_at, date_to_sql, id_at, stage_at, timestamp_at},
};
use crate::{
    error::{CrmError, DatabaseResultExt, Result},
    models::{Deal, DealFilter},
    params::{normalize_currency, CreateDeal, UpdateDeal},
};

const DEAL_COLUMNS: &str = "id, title, contact_id, value, currency, stage, expected_close_date, notes, follow_up, created_by, created_at, updated_at";
const INSERT_DEAL_SQL: &str = "INSERT INTO deals (title, contact_id, value, currency, stage, expected_close_date, notes, follow_up, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const REPLACE_DEAL_SQL: &str = "UPDATE deals SET title = ?1, contact_id = ?2, value = ?3, currency = ?4, stage = ?5, expected_close_date = ?6, notes = ?7, follow_up = ?8, updated_at = ?9 WHERE id = ?10";
const DELETE_DEAL_SQL: &str = "DELETE FROM deals WHERE id = ?1";

impl super::Database {
    /// Helper function to construct a Deal from a database row
    fn build_deal_from_row(row: &rusqlite::Row) -> rusqlite::Result<Deal> {
        Ok(Deal {
            id: id_at(row, 0)?,
            title: row.get(1)?,
            contact_id: id_at(row, 2)?,
            value: row.get(3)?,
            currency: row.get(4)?,
            stage: stage_at(row, 5)?,
            expected_close_date: date_at(row, 6)?,
            notes: row.get(7)?,
            follow_up: row.get(8)?,
            created_by: row.get(9)?,
            created_at: timestamp_at(row, 10)?,
            updated_at: timestamp_at(row, 11)?,
        })
    }

    /// Creates a deal after checking that its contact exists.
    pub fn create_deal(&mut self, params: &CreateDeal, created_by: Option<&str>) -> Result<Deal> {
        params.validate()?;
        let currency = normalize_currency(params.currency.as_deref())?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let contact_exists: bool = tx
            .query_row(
                CHECK_CONTACT_EXISTS_SQL,
                params![params.contact_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check contact existence")?;

        if !contact_exists {
            return Err(CrmError::ContactNotFound {
                id: params.contact_id,
            });
        }

        let now = Timestamp::now();
        let now_str = now.to_string();
        let stage = params.stage.unwrap_or_default();
        let title = params.title.trim();

        tx.execute(
            INSERT_DEAL_SQL,
            params![
                title,
                params.contact_id as i64,
                params.value,
                currency,
                stage.as_str(),
                date_to_sql(params.expected_close_date),
                params.notes,
                params.follow_up,
                created_by,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert deal")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Deal {
            id,
            title: title.to_string(),
            contact_id: params.contact_id,
            value: params.value,
            currency,
            stage,
            expected_close_date: params.expected_close_date,
            notes: params.notes.clone(),
            follow_up: params.follow_up,
            created_by: created_by.map(String::from),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a deal by its ID.
    pub fn get_deal(&self, id: u64) -> Result<Option<Deal>> {
        self.connection
            .query_row(
                &format!("SELECT {DEAL_COLUMNS} FROM deals WHERE id = ?1"),
                params![id as i64],
                Self::build_deal_from_row,
            )
            .optional()
            .db_context("Failed to query deal")
    }

    /// Lists deals newest first, optionally filtered.
    pub fn list_deals(&self, filter: Option<&DealFilter>) -> Result<Vec<Deal>> {
        let mut query = format!("SELECT {DEAL_COLUMNS} FROM deals");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(stage) = f.stage {
                conditions.push("stage = ?");
                params_vec.push(Box::new(stage.as_str()));
            }
            if let Some(contact_id) = f.contact_id {
                conditions.push("contact_id = ?");
                params_vec.push(Box::new(contact_id as i64));
            }
            if f.follow_up_only {
                conditions.push("follow_up = 1");
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let deals = stmt
            .query_map(&params_refs[..], Self::build_deal_from_row)
            .db_context("Failed to query deals")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read deal row")?;

        Ok(deals)
    }

    /// Writes every mutable field of `deal` over the stored record with the
    /// same ID. Last write wins; `created_*` fields are never touched.
    pub fn replace_deal(&mut self, deal: &Deal) -> Result<Deal> {
        let currency = normalize_currency(Some(&deal.currency))?;
        let now = Timestamp::now();

        let affected = self
            .connection
            .execute(
                REPLACE_DEAL_SQL,
                params![
                    deal.title,
                    deal.contact_id as i64,
                    deal.value,
                    currency,
                    deal.stage.as_str(),
                    date_to_sql(deal.expected_close_date),
                    deal.notes,
                    deal.follow_up,
                    now.to_string(),
                    deal.id as i64
                ],
            )
            .db_context("Failed to update deal")?;

        if affected == 0 {
            return Err(CrmError::DealNotFound { id: deal.id });
        }

        Ok(Deal {
            currency,
            updated_at: now,
            ..deal.clone()
        })
    }

    /// Applies the present fields of `params` to an existing deal.
    pub fn update_deal(&mut self, params: &UpdateDeal) -> Result<Deal> {
        params.validate()?;

        let current = self
            .get_deal(params.id)?
            .ok_or(CrmError::DealNotFound { id: params.id })?;

        if let Some(contact_id) = params.contact_id {
            if !self.contact_exists(contact_id)? {
                return Err(CrmError::ContactNotFound { id: contact_id });
            }
        }

        let expected_close_date = if params.clear_close_date {
            None
        } else {
            params.expected_close_date.or(current.expected_close_date)
        };
        let notes = if params.clear_notes {
            None
        } else {
            params.notes.clone().or(current.notes)
        };

        let updated = Deal {
            title: params
                .title
                .as_deref()
                .map(str::trim)
                .map(String::from)
                .unwrap_or(current.title),
            contact_id: params.contact_id.unwrap_or(current.contact_id),
            value: params.value.unwrap_or(current.value),
            currency: params.currency.clone().unwrap_or(current.currency),
            stage: params.stage.unwrap_or(current.stage),
            expected_close_date,
            notes,
            follow_up: params.follow_up.unwrap_or(current.follow_up),
            ..current
        };

        self.replace_deal(&updated)
    }

    /// Deletes a deal and its activity entries.
    pub fn delete_deal(&mut self, id: u64) -> Result<()> {
        let affected = self
            .connection
            .execute(DELETE_DEAL_SQL, params![id as i64])
            .db_context("Failed to delete deal")?;

        if affected == 0 {
            return Err(CrmError::DealNotFound { id });
        }
        Ok(())
    }
}
