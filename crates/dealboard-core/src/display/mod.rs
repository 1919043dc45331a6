//! Markdown rendering of models, collections, operation results and
//! reports.
//!
//! Domain models implement `Display` directly; collections and operation
//! outcomes get newtype wrappers. Everything that can carry sensitive data
//! also implements [`MaskedDisplay`], so front ends can render it for demo
//! mode through [`Masked`]:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers + Mask │    │    Markdown     │
//! │  (Deal, ...)    │───▶│ (Deals, Masked) │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (Deals, Contacts, Activities, BoardColumns)
//! - [`results`]: Operation results (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: One-line confirmations (OperationStatus)
//! - [`reports`]: Dashboard, goals and calendar views
//! - [`mask`]: Demo-mode redaction and money formatting
//! - [`datetime`]: Timestamp formatting in the system time zone
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use dealboard_core::display::{Mask, Money, OperationStatus};
//!
//! println!("{}", OperationStatus::success("Deal moved to won"));
//! assert_eq!(Money::new(250_000.0, "SEK").to_string(), "250 000 kr");
//! assert_eq!(Mask::Demo.money(250_000.0, "SEK").to_string(), "████ kr");
//! ```

pub mod collections;
pub mod datetime;
pub mod mask;
pub mod models;
pub mod reports;
pub mod results;
pub mod status;

pub use collections::{Activities, BoardColumns, Contacts, Deals};
pub use datetime::LocalDateTime;
pub use mask::{Mask, Masked, MaskedDisplay, Money};
pub use results::{CreateResult, DeleteResult, Resource, UpdateResult};
pub use status::OperationStatus;
