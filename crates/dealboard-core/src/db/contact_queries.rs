//! Contact CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{date_at, date_to_sql, id_at, timestamp_at};
use crate::{
    error::{CrmError, DatabaseResultExt, Result},
    models::{Contact, ContactFilter},
    params::{CreateContact, UpdateContact},
};

const CONTACT_COLUMNS: &str = "id, name, company, email, phone, notes, follow_up, met_via, next_step, next_action_date, social_url, website, created_by, created_at, updated_at";
const INSERT_CONTACT_SQL: &str = "INSERT INTO contacts (name, company, email, phone, notes, follow_up, met_via, next_step, next_action_date, social_url, website, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const UPDATE_CONTACT_SQL: &str = "UPDATE contacts SET name = ?1, company = ?2, email = ?3, phone = ?4, notes = ?5, follow_up = ?6, met_via = ?7, next_step = ?8, next_action_date = ?9, social_url = ?10, website = ?11, updated_at = ?12 WHERE id = ?13";
const DELETE_CONTACT_SQL: &str = "DELETE FROM contacts WHERE id = ?1";
pub(super) const CHECK_CONTACT_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM contacts WHERE id = ?1)";

impl super::Database {
    /// Helper function to construct a Contact from a database row
    fn build_contact_from_row(row: &rusqlite::Row) -> rusqlite::Result<Contact> {
        Ok(Contact {
            id: id_at(row, 0)?,
            name: row.get(1)?,
            company: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
            notes: row.get(5)?,
            follow_up: row.get(6)?,
            met_via: row.get(7)?,
            next_step: row.get(8)?,
            next_action_date: date_at(row, 9)?,
            social_url: row.get(10)?,
            website: row.get(11)?,
            created_by: row.get(12)?,
            created_at: timestamp_at(row, 13)?,
            updated_at: timestamp_at(row, 14)?,
        })
    }

    /// Inserts a contact, stamping it with the acting user.
    pub fn create_contact(
        &mut self,
        params: &CreateContact,
        created_by: Option<&str>,
    ) -> Result<Contact> {
        params.validate()?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let name = params.name.trim();

        self.connection
            .execute(
                INSERT_CONTACT_SQL,
                params![
                    name,
                    params.company,
                    params.email,
                    params.phone,
                    params.notes,
                    params.follow_up,
                    params.met_via,
                    params.next_step,
                    date_to_sql(params.next_action_date),
                    params.social_url,
                    params.website,
                    created_by,
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert contact")?;

        let id = self.connection.last_insert_rowid() as u64;

        Ok(Contact {
            id,
            name: name.to_string(),
            company: params.company.clone(),
            email: params.email.clone(),
            phone: params.phone.clone(),
            notes: params.notes.clone(),
            follow_up: params.follow_up,
            met_via: params.met_via.clone(),
            next_step: params.next_step.clone(),
            next_action_date: params.next_action_date,
            social_url: params.social_url.clone(),
            website: params.website.clone(),
            created_by: created_by.map(String::from),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a contact by its ID.
    pub fn get_contact(&self, id: u64) -> Result<Option<Contact>> {
        self.connection
            .query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
                params![id as i64],
                Self::build_contact_from_row,
            )
            .optional()
            .db_context("Failed to query contact")
    }

    /// Lists contacts ordered by name, optionally filtered.
    pub fn list_contacts(&self, filter: Option<&ContactFilter>) -> Result<Vec<Contact>> {
        let mut query = format!("SELECT {CONTACT_COLUMNS} FROM contacts");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref q) = f.query {
                conditions.push("(LOWER(name) LIKE ? OR LOWER(company) LIKE ?)");
                let pattern = format!("%{}%", q.to_lowercase());
                params_vec.push(Box::new(pattern.clone()));
                params_vec.push(Box::new(pattern));
            }
            if f.follow_up_only {
                conditions.push("follow_up = 1");
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY name COLLATE NOCASE, id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let contacts = stmt
            .query_map(&params_refs[..], Self::build_contact_from_row)
            .db_context("Failed to query contacts")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read contact row")?;

        Ok(contacts)
    }

    /// Applies the present fields of `params` to an existing contact.
    pub fn update_contact(&mut self, params: &UpdateContact) -> Result<Contact> {
        params.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
                params![params.id as i64],
                Self::build_contact_from_row,
            )
            .optional()
            .db_context("Failed to query contact")?
            .ok_or(CrmError::ContactNotFound { id: params.id })?;

        let now = Timestamp::now();
        let updated = Contact {
            name: params
                .name
                .as_deref()
                .map(str::trim)
                .map(String::from)
                .unwrap_or(current.name),
            company: params.company.clone().unwrap_or(current.company),
            email: params.email.clone().unwrap_or(current.email),
            phone: params.phone.clone().unwrap_or(current.phone),
            notes: params.notes.clone().unwrap_or(current.notes),
            follow_up: params.follow_up.unwrap_or(current.follow_up),
            met_via: params.met_via.clone().or(current.met_via),
            next_step: params.next_step.clone().or(current.next_step),
            next_action_date: params.next_action_date.or(current.next_action_date),
            social_url: params.social_url.clone().or(current.social_url),
            website: params.website.clone().or(current.website),
            updated_at: now,
            ..current
        };

        tx.execute(
            UPDATE_CONTACT_SQL,
            params![
                updated.name,
                updated.company,
                updated.email,
                updated.phone,
                updated.notes,
                updated.follow_up,
                updated.met_via,
                updated.next_step,
                date_to_sql(updated.next_action_date),
                updated.social_url,
                updated.website,
                now.to_string(),
                updated.id as i64
            ],
        )
        .db_context("Failed to update contact")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }

    /// Deletes a contact. Its deals and activity entries go with it.
    pub fn delete_contact(&mut self, id: u64) -> Result<()> {
        let affected = self
            .connection
            .execute(DELETE_CONTACT_SQL, params![id as i64])
            .db_context("Failed to delete contact")?;

        if affected == 0 {
            return Err(CrmError::ContactNotFound { id });
        }
        Ok(())
    }

    /// Whether a contact with the given ID exists.
    pub fn contact_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_CONTACT_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check contact existence")
    }
}
