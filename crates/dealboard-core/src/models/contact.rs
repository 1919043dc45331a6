//! Contact model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// A person or company the team is in touch with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Contact {
    /// Unique identifier for the contact
    pub id: u64,

    /// Name of the contact person
    pub name: String,

    /// Company the contact works for
    #[serde(default)]
    pub company: String,

    /// Email address
    #[serde(default)]
    pub email: String,

    /// Phone number
    #[serde(default)]
    pub phone: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Flagged for follow-up
    #[serde(default)]
    pub follow_up: bool,

    /// Where or how the team met this contact
    pub met_via: Option<String>,

    /// Agreed next step with the contact
    pub next_step: Option<String>,

    /// Date the next step is due
    pub next_action_date: Option<Date>,

    /// Social profile URL
    pub social_url: Option<String>,

    /// Company website
    pub website: Option<String>,

    /// Email of the team member who added the contact
    pub created_by: Option<String>,

    /// Timestamp when the contact was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the contact was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Contact {
    /// Case-insensitive match on name or company.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.company.to_lowercase().contains(&query)
    }
}
