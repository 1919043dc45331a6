//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

/// Columns added after the first release: (table, column, definition).
const LATE_COLUMNS: &[(&str, &str, &str)] = &[
    ("deals", "follow_up", "INTEGER NOT NULL DEFAULT 0"),
    ("contacts", "next_action_date", "TEXT"),
    ("contacts", "social_url", "TEXT"),
    ("contacts", "website", "TEXT"),
];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Adds columns missing from databases created by older builds.
    fn apply_migrations(&self) -> Result<()> {
        for (table, column, definition) in LATE_COLUMNS {
            if !self.has_column(table, column)? {
                log::info!("Migrating {table}: adding column {column}");
                self.connection
                    .execute(
                        &format!("ALTER TABLE {table} ADD COLUMN {column} {definition}"),
                        [],
                    )
                    .db_context("Failed to add missing column")?;
            }
        }
        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .db_context("Failed to inspect table columns")
    }
}
