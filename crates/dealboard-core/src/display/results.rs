//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use super::mask::{Mask, MaskedDisplay};
use crate::models::{Activity, Contact, Deal};

/// A record that create, update and delete results can describe.
pub trait Resource: MaskedDisplay {
    /// Lower-case noun used in messages, e.g. `deal`
    const KIND: &'static str;

    fn id(&self) -> u64;

    /// Human name of the record, hidden in demo mode
    fn label(&self) -> &str;
}

impl Resource for Deal {
    const KIND: &'static str = "deal";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

impl Resource for Contact {
    const KIND: &'static str = "contact";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Resource for Activity {
    const KIND: &'static str = "activity";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.note
    }
}

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use dealboard_core::{display::CreateResult, models::Contact};
///
/// let contact = Contact {
///     id: 4,
///     name: "Lina Berg".to_string(),
///     ..Default::default()
/// };
/// let output = CreateResult::new(contact).to_string();
/// assert!(output.starts_with("Created contact with ID: 4"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> MaskedDisplay for CreateResult<T> {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::KIND, self.resource.id())?;
        writeln!(f)?;
        self.resource.fmt_masked(f, mask)
    }
}

/// Wrapper type for displaying the result of update operations, with an
/// optional list of what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource> MaskedDisplay for UpdateResult<T> {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        self.resource.fmt_masked(f, mask)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> MaskedDisplay for DeleteResult<T> {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        writeln!(
            f,
            "Deleted {} '{}' (ID: {})",
            T::KIND,
            mask.name(self.resource.label()),
            self.resource.id()
        )
    }
}

macro_rules! plain_display {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Resource> fmt::Display for $wrapper<T> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.fmt_masked(f, Mask::Off)
                }
            }
        )*
    };
}

plain_display!(CreateResult, UpdateResult, DeleteResult);

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{display::Masked, models::Stage};

    fn deal() -> Deal {
        Deal {
            id: 9,
            title: "Solar panels".to_string(),
            contact_id: 1,
            value: 80_000.0,
            currency: "SEK".to_string(),
            stage: Stage::Won,
            expected_close_date: None,
            notes: None,
            follow_up: false,
            created_by: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn update_result_lists_changes() {
        let result = UpdateResult::with_changes(deal(), vec!["Moved to won".to_string()]);
        let output = result.to_string();
        assert!(output.starts_with("Updated deal with ID: 9"));
        assert!(output.contains("Changes made:\n- Moved to won"));
        assert!(output.contains("## Solar panels (ID: 9)"));
    }

    #[test]
    fn delete_result_masks_label() {
        let result = DeleteResult::new(deal());
        assert_eq!(result.to_string(), "Deleted deal 'Solar panels' (ID: 9)\n");
        assert!(!Masked(&result, Mask::Demo).to_string().contains("Solar"));
    }
}
