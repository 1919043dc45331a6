//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper renders its items one after another and prints a single
//! "No ... found." line when empty.

use std::{collections::HashMap, fmt, ops::Index};

use super::mask::{Mask, MaskedDisplay};
use crate::{
    board::{BoardColumn, PipelineBoard},
    models::{Activity, Contact, Deal},
};

/// Newtype wrapper for displaying a list of deals.
///
/// # Examples
///
/// ```rust
/// use dealboard_core::{display::Deals, models::{Deal, Stage}};
/// use jiff::Timestamp;
///
/// let deal = Deal {
///     id: 1,
///     title: "Roof renovation".to_string(),
///     contact_id: 1,
///     value: 12_500.0,
///     currency: "SEK".to_string(),
///     stage: Stage::Potential,
///     expected_close_date: None,
///     notes: None,
///     follow_up: false,
///     created_by: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = Deals(vec![deal]).to_string();
/// assert!(output.contains("Roof renovation"));
/// ```
pub struct Deals(pub Vec<Deal>);

/// Newtype wrapper for displaying a list of contacts.
pub struct Contacts(pub Vec<Contact>);

/// Newtype wrapper for displaying a diary.
pub struct Activities(pub Vec<Activity>);

macro_rules! collection {
    ($wrapper:ident, $item:ty, $empty:literal) => {
        impl $wrapper {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $wrapper {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $wrapper {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $wrapper {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl MaskedDisplay for $wrapper {
            fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
                if self.0.is_empty() {
                    return writeln!(f, $empty);
                }
                for item in &self.0 {
                    item.fmt_masked(f, mask)?;
                }
                Ok(())
            }
        }

        impl fmt::Display for $wrapper {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.fmt_masked(f, Mask::Off)
            }
        }
    };
}

collection!(Deals, Deal, "No deals found.");
collection!(Contacts, Contact, "No contacts found.");
collection!(Activities, Activity, "No activity logged yet.");

/// The board as rendered: visible columns with their cards.
pub struct BoardColumns {
    pub columns: Vec<BoardColumn>,
    /// Contact names by contact ID, for the card subtitle
    pub contact_names: HashMap<u64, String>,
}

impl BoardColumns {
    /// Captures the columns the board currently shows.
    pub fn from_board(board: &PipelineBoard) -> Self {
        let columns = board.visible_columns();
        let contact_names = columns
            .iter()
            .flat_map(|c| &c.deals)
            .filter_map(|d| {
                board
                    .contact_name(d)
                    .map(|name| (d.contact_id, name.to_string()))
            })
            .collect();
        Self {
            columns,
            contact_names,
        }
    }
}

impl MaskedDisplay for BoardColumns {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        for column in &self.columns {
            let currency = column
                .deals
                .first()
                .map_or(crate::models::DEFAULT_CURRENCY, |d| d.currency.as_str());
            writeln!(
                f,
                "## {} ({}) · {}",
                column.stage.label(),
                column.deals.len(),
                mask.money(column.total, currency)
            )?;
            writeln!(f)?;

            if column.deals.is_empty() {
                writeln!(f, "_No deals._")?;
            }
            for deal in &column.deals {
                write!(
                    f,
                    "- **{}** `{}` · {}",
                    mask.name(&deal.title),
                    deal.id,
                    mask.money(deal.value, &deal.currency)
                )?;
                if let Some(name) = self.contact_names.get(&deal.contact_id) {
                    write!(f, " · {}", mask.name(name))?;
                }
                if deal.follow_up {
                    write!(f, " · follow-up")?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for BoardColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_masked(f, Mask::Off)
    }
}
