//! Activity log queries for contact and deal diaries.

use jiff::Timestamp;
use rusqlite::params;

use super::utils::{id_at, timestamp_at};
use crate::{
    error::{CrmError, DatabaseResultExt, Result},
    models::{Activity, ActivitySubject},
    params::AddActivity,
};

/// Table and foreign-key column holding entries for a subject kind.
fn table_for(subject: ActivitySubject) -> (&'static str, &'static str) {
    match subject {
        ActivitySubject::Contact(_) => ("contact_activities", "contact_id"),
        ActivitySubject::Deal(_) => ("deal_activities", "deal_id"),
    }
}

impl super::Database {
    /// Appends a diary entry to a contact or deal.
    pub fn add_activity(&mut self, params: &AddActivity, created_by: Option<&str>) -> Result<Activity> {
        let note = params.trimmed_note()?;
        let subject = params.subject;

        let exists = match subject {
            ActivitySubject::Contact(id) => self.contact_exists(id)?,
            ActivitySubject::Deal(id) => self.get_deal(id)?.is_some(),
        };
        if !exists {
            return Err(match subject {
                ActivitySubject::Contact(id) => CrmError::ContactNotFound { id },
                ActivitySubject::Deal(id) => CrmError::DealNotFound { id },
            });
        }

        let (table, column) = table_for(subject);
        let now = Timestamp::now();

        self.connection
            .execute(
                &format!(
                    "INSERT INTO {table} ({column}, note, created_by, created_at) VALUES (?1, ?2, ?3, ?4)"
                ),
                params![subject.id() as i64, note, created_by, now.to_string()],
            )
            .db_context("Failed to insert activity")?;

        Ok(Activity {
            id: self.connection.last_insert_rowid() as u64,
            subject,
            note: note.to_string(),
            created_by: created_by.map(String::from),
            created_at: now,
        })
    }

    /// Lists a subject's diary, newest entry first.
    pub fn list_activities(&self, subject: ActivitySubject) -> Result<Vec<Activity>> {
        let (table, column) = table_for(subject);

        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT id, note, created_by, created_at FROM {table} WHERE {column} = ?1 ORDER BY id DESC"
            ))
            .db_context("Failed to prepare query")?;

        let activities = stmt
            .query_map(params![subject.id() as i64], |row| {
                Ok(Activity {
                    id: id_at(row, 0)?,
                    subject,
                    note: row.get(1)?,
                    created_by: row.get(2)?,
                    created_at: timestamp_at(row, 3)?,
                })
            })
            .db_context("Failed to query activities")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read activity row")?;

        Ok(activities)
    }

    /// Removes one entry from a subject's diary.
    pub fn delete_activity(&mut self, subject: ActivitySubject, id: u64) -> Result<()> {
        let (table, column) = table_for(subject);

        let affected = self
            .connection
            .execute(
                &format!("DELETE FROM {table} WHERE id = ?1 AND {column} = ?2"),
                params![id as i64, subject.id() as i64],
            )
            .db_context("Failed to delete activity")?;

        if affected == 0 {
            return Err(CrmError::ActivityNotFound { id });
        }
        Ok(())
    }
}
