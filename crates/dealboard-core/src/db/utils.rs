//! Conversions between SQLite column values and domain types.

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};

use crate::models::Stage;

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads an optional `YYYY-MM-DD` column.
pub(crate) fn date_at(row: &Row, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Reads a stage column.
pub(crate) fn stage_at(row: &Row, idx: usize) -> rusqlite::Result<Stage> {
    let stage_str: String = row.get(idx)?;
    stage_str.parse::<Stage>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("Invalid stage: {stage_str}").into(),
        )
    })
}

/// Reads an INTEGER primary or foreign key.
pub(crate) fn id_at(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    row.get::<_, i64>(idx).map(|id| id as u64)
}

/// Formats an optional date for storage.
pub(crate) fn date_to_sql(date: Option<Date>) -> Option<String> {
    date.map(|d| d.to_string())
}
