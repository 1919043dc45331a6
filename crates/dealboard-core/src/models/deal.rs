//! Deal model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::Stage;

/// Currency used when a deal does not name one.
pub const DEFAULT_CURRENCY: &str = "SEK";

/// A business opportunity tied to one contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    /// Unique identifier, stable for the deal's lifetime
    pub id: u64,

    /// Display title
    pub title: String,

    /// Contact the deal is negotiated with
    pub contact_id: u64,

    /// Non-negative amount in `currency`
    pub value: f64,

    /// Three-letter currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Pipeline stage; the only field the board mutates
    #[serde(default)]
    pub stage: Stage,

    /// Expected close date, shown on the calendar
    pub expected_close_date: Option<Date>,

    /// Free-form notes
    pub notes: Option<String>,

    /// Flagged for follow-up, independent of stage
    #[serde(default)]
    pub follow_up: bool,

    /// Email of the team member who created the deal
    pub created_by: Option<String>,

    /// Timestamp when the deal was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the deal was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Deal {
    /// Returns the complete record with only the stage replaced.
    pub fn with_stage(&self, stage: Stage) -> Deal {
        Deal {
            stage,
            ..self.clone()
        }
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}
