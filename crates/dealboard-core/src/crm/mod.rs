//! High-level async API over the deal store.
//!
//! [`Crm`] is the data-access layer every front end talks to. Each
//! operation opens its own SQLite connection on a blocking worker thread,
//! so a `Crm` is cheap to clone and share between tasks.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Front ends    │    │       Crm       │    │    Database     │
//! │ (CLI, board)    │───▶│ (async, events) │───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Crm`] instances (path, user, team)
//! - [`contact_ops`]: Contact operations
//! - [`deal_ops`]: Deal operations and the [`crate::DealStore`] impl
//! - [`activity_ops`]: Diary entries for contacts and deals
//!
//! ## Change notifications
//!
//! Every successful mutation publishes a [`ChangeEvent`]. Subscribers are
//! expected to re-list the affected records; events carry no payload.
//!
//! ```rust,no_run
//! use dealboard_core::{crm::ChangeEvent, CrmBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let crm = CrmBuilder::new().build().await?;
//! let mut changes = crm.subscribe();
//!
//! while let Ok(event) = changes.recv().await {
//!     if event == ChangeEvent::Deals {
//!         let deals = crm.list_deals(None).await?;
//!         println!("{} deals", deals.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::{sync::broadcast, task};

use crate::{
    db::Database,
    error::{CrmError, Result},
};

pub mod activity_ops;
pub mod builder;
pub mod contact_ops;
pub mod deal_ops;

#[cfg(test)]
mod tests;

pub use builder::CrmBuilder;

/// Capacity of the change-notification channel. Slow subscribers see
/// `RecvError::Lagged` and should simply re-list.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Which table a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Contacts,
    Deals,
    Activities,
}

/// Main interface for managing contacts, deals and activity entries.
#[derive(Clone)]
pub struct Crm {
    pub(crate) db_path: PathBuf,
    pub(crate) user: Option<String>,
    events: broadcast::Sender<ChangeEvent>,
}

impl Crm {
    pub(crate) fn new(db_path: PathBuf, user: Option<String>) -> Self {
        let (events, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            db_path,
            user,
            events,
        }
    }

    /// Email of the acting team member, stamped as `created_by`.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    /// Runs `op` against a fresh connection on a blocking thread.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| CrmError::join(&e))?
    }

    /// Publishes a change. Having no subscribers is not an error.
    pub(crate) fn notify(&self, event: ChangeEvent) {
        log::debug!("Publishing change event {event:?}");
        let _ = self.events.send(event);
    }
}
