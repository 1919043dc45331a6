//! The data-layer contract the pipeline board depends on.

use std::future::Future;

use crate::{
    error::Result,
    models::{Contact, Deal},
};

/// Source of deals and contacts, and sink for whole-record deal updates.
///
/// [`crate::Crm`] implements this over SQLite; tests substitute in-memory
/// fakes. The board never subscribes to changes itself: whoever owns the
/// board re-lists and hands it a fresh snapshot.
pub trait DealStore {
    /// All deals. Order is irrelevant to the board.
    fn list_deals(&self) -> impl Future<Output = Result<Vec<Deal>>> + Send;

    /// All contacts, used only to resolve counterparty names.
    fn list_contacts(&self) -> impl Future<Output = Result<Vec<Contact>>> + Send;

    /// Persists `deal` verbatim over the record with the same ID and
    /// returns the stored record. Last write wins.
    fn update_deal(&self, deal: &Deal) -> impl Future<Output = Result<Deal>> + Send;
}
