//! Parameter structures for dealboard operations
//!
//! These structures are shared across interfaces (the CLI today, tests, any
//! future front end) and carry no framework-specific derives. Interface
//! layers define their own argument types and convert into these via
//! `From` impls:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │       Crm       │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (validation +   │
//! └─────────────────┘    └─────────────────┘    │  persistence)   │
//!                                               └─────────────────┘
//! ```
//!
//! Validation lives here too, so every interface rejects the same input
//! with the same [`CrmError::InvalidInput`] message.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CrmError, Result},
    models::{ActivitySubject, Stage, DEFAULT_CURRENCY},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for adding a contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateContact {
    /// Name of the contact person (required)
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub follow_up: bool,
    pub met_via: Option<String>,
    pub next_step: Option<String>,
    pub next_action_date: Option<Date>,
    pub social_url: Option<String>,
    pub website: Option<String>,
}

impl CreateContact {
    /// Checks the fields the contact form requires.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)
    }
}

/// Parameters for editing a contact. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContact {
    pub id: u64,
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub follow_up: Option<bool>,
    pub met_via: Option<String>,
    pub next_step: Option<String>,
    pub next_action_date: Option<Date>,
    pub social_url: Option<String>,
    pub website: Option<String>,
}

impl UpdateContact {
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => require_non_empty("name", name),
            None => Ok(()),
        }
    }
}

/// Parameters for searching contacts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchContacts {
    /// Case-insensitive text matched against name and company
    pub query: Option<String>,
    /// Only contacts flagged for follow-up
    #[serde(default)]
    pub follow_up: bool,
}

/// Parameters for creating a deal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDeal {
    /// Title of the deal (required)
    pub title: String,
    /// Contact the deal belongs to; must exist
    pub contact_id: u64,
    /// Non-negative amount
    pub value: f64,
    /// Three-letter currency code, defaults to SEK
    pub currency: Option<String>,
    /// Starting stage, defaults to potential
    pub stage: Option<Stage>,
    pub expected_close_date: Option<Date>,
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up: bool,
}

impl CreateDeal {
    /// Checks title, value and currency. Contact existence is checked by
    /// the store inside the insert transaction.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("title", &self.title)?;
        validate_value(self.value)?;
        normalize_currency(self.currency.as_deref()).map(|_| ())
    }
}

/// Parameters for editing a deal. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDeal {
    pub id: u64,
    pub title: Option<String>,
    pub contact_id: Option<u64>,
    pub value: Option<f64>,
    pub currency: Option<String>,
    pub stage: Option<Stage>,
    pub expected_close_date: Option<Date>,
    /// Removes the expected close date; wins over `expected_close_date`
    #[serde(default)]
    pub clear_close_date: bool,
    pub notes: Option<String>,
    /// Removes the notes; wins over `notes`
    #[serde(default)]
    pub clear_notes: bool,
    pub follow_up: Option<bool>,
}

impl UpdateDeal {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_non_empty("title", title)?;
        }
        if let Some(value) = self.value {
            validate_value(value)?;
        }
        if self.currency.is_some() {
            normalize_currency(self.currency.as_deref())?;
        }
        Ok(())
    }
}

/// Parameters for moving a deal to another stage outside the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveDeal {
    pub id: u64,
    pub stage: Stage,
}

/// Parameters for listing deals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDeals {
    /// Only deals in this stage
    pub stage: Option<Stage>,
    /// Only deals flagged for follow-up
    #[serde(default)]
    pub follow_up: bool,
    /// Only deals for this contact
    pub contact_id: Option<u64>,
}

/// Parameters for deleting a deal or contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Delete {
    pub id: u64,
    /// Must be true; guards against accidental deletion
    #[serde(default)]
    pub confirmed: bool,
}

impl Delete {
    pub fn validate(&self) -> Result<()> {
        if self.confirmed {
            Ok(())
        } else {
            Err(CrmError::invalid_input("confirmed")
                .with_reason("deletion must be confirmed; it cannot be undone"))
        }
    }
}

/// Parameters for logging a diary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddActivity {
    pub subject: ActivitySubject,
    pub note: String,
}

impl AddActivity {
    /// Returns the trimmed note, rejecting blank entries.
    pub fn trimmed_note(&self) -> Result<&str> {
        let note = self.note.trim();
        if note.is_empty() {
            Err(CrmError::invalid_input("note").with_reason("must not be empty"))
        } else {
            Ok(note)
        }
    }
}

/// Parameters for the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i16,
    /// 1-based month
    pub month: i8,
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(CrmError::invalid_input(field).with_reason("must not be empty"))
    } else {
        Ok(())
    }
}

fn validate_value(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CrmError::invalid_input("value")
            .with_reason(format!("must be a non-negative amount, got {value}")));
    }
    Ok(())
}

/// Upper-cases a currency code, falling back to [`DEFAULT_CURRENCY`].
pub fn normalize_currency(currency: Option<&str>) -> Result<String> {
    let Some(code) = currency.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(DEFAULT_CURRENCY.to_string());
    };
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CrmError::invalid_input("currency")
            .with_reason(format!("expected a three-letter code, got '{code}'")));
    }
    Ok(code.to_ascii_uppercase())
}
