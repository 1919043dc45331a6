//! Data models for contacts, deals and activity entries.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so that presentation stays out of the data
//! definitions.
//!
//! # Examples
//!
//! ```rust
//! use dealboard_core::models::{Deal, Stage};
//! use jiff::Timestamp;
//!
//! let deal = Deal {
//!     id: 1,
//!     title: "Website rebuild".to_string(),
//!     contact_id: 7,
//!     value: 45_000.0,
//!     currency: "SEK".to_string(),
//!     stage: Stage::Potential,
//! #   expected_close_date: None,
//! #   notes: None,
//! #   follow_up: false,
//! #   created_by: None,
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! };
//!
//! let won = deal.with_stage(Stage::Won);
//! assert_eq!(won.stage, Stage::Won);
//! assert_eq!(won.title, deal.title);
//! ```

pub mod activity;
pub mod contact;
pub mod deal;
pub mod filters;
pub mod stage;


pub use activity::{Activity, ActivitySubject};
pub use contact::Contact;
pub use deal::{Deal, DEFAULT_CURRENCY};
pub use filters::{ContactFilter, DealFilter};
pub use stage::Stage;
