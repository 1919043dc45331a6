//! Filter types for querying deals and contacts.

use super::Stage;

/// Filter options for querying deals.
#[derive(Debug, Clone, Default)]
pub struct DealFilter {
    /// Only deals in this stage
    pub stage: Option<Stage>,

    /// Only deals flagged for follow-up
    pub follow_up_only: bool,

    /// Only deals for this contact
    pub contact_id: Option<u64>,
}

/// Filter options for querying contacts.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    /// Case-insensitive match on name or company
    pub query: Option<String>,

    /// Only contacts flagged for follow-up
    pub follow_up_only: bool,
}

impl From<&crate::params::ListDeals> for DealFilter {
    fn from(params: &crate::params::ListDeals) -> Self {
        Self {
            stage: params.stage,
            follow_up_only: params.follow_up,
            contact_id: params.contact_id,
        }
    }
}

impl From<&crate::params::SearchContacts> for ContactFilter {
    /// An empty or blank query lists every contact.
    fn from(params: &crate::params::SearchContacts) -> Self {
        Self {
            query: params
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(String::from),
            follow_up_only: params.follow_up,
        }
    }
}
