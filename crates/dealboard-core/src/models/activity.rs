//! Activity log ("diary") entries attached to contacts and deals.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// The record an activity entry belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ActivitySubject {
    Contact(u64),
    Deal(u64),
}

impl ActivitySubject {
    /// Name of the subject kind, used in messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ActivitySubject::Contact(_) => "contact",
            ActivitySubject::Deal(_) => "deal",
        }
    }

    /// Identifier of the subject record.
    pub fn id(&self) -> u64 {
        match self {
            ActivitySubject::Contact(id) | ActivitySubject::Deal(id) => *id,
        }
    }
}

/// A timestamped note logged against a contact or deal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Unique identifier within the subject kind
    pub id: u64,

    /// Contact or deal the note belongs to
    pub subject: ActivitySubject,

    /// Note text, never empty
    pub note: String,

    /// Email of the team member who wrote the note
    pub created_by: Option<String>,

    /// Timestamp when the note was written (UTC)
    pub created_at: Timestamp,
}
