//! Core library for the dealboard sales pipeline.
//!
//! This crate holds the business logic for a small team's CRM: contacts,
//! deals moving through four pipeline stages, a diary of activity entries,
//! and the drag-and-drop board that moves deals between stages.
//!
//! # Architecture
//!
//! - **Store** ([`crm`], [`db`]): async [`Crm`] facade over SQLite,
//!   implementing the [`DealStore`] contract the board depends on
//! - **Board** ([`board`]): target classification, collision ranking, the
//!   drag session state machine and the stage-mutation policy
//! - **Views** ([`dashboard`], [`goals`], [`calendar`]): read-only
//!   derivations from the current deal and contact lists
//! - **Display** ([`display`]): Markdown rendering with an optional demo
//!   mask that hides names and amounts
//!
//! # Quick Start
//!
//! ```rust
//! use dealboard_core::{
//!     board::{BoardLayout, DeviceMode, DropOutcome, PipelineBoard, TargetId},
//!     models::Stage,
//!     params::{CreateContact, CreateDeal},
//!     CrmBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let crm = CrmBuilder::new()
//!     .with_database_path(Some("pipeline.db"))
//!     .build()
//!     .await?;
//!
//! let contact = crm
//!     .create_contact(&CreateContact {
//!         name: "Lina Berg".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! let deal = crm
//!     .create_deal(&CreateDeal {
//!         title: "Office fit-out".to_string(),
//!         contact_id: contact.id,
//!         value: 120_000.0,
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // Drag the card onto the "won" column and drop it.
//! let mut board = PipelineBoard::new(DeviceMode::Desktop);
//! board.refresh(&crm).await?;
//! let layout = BoardLayout::default();
//! let frame = layout
//!     .drop_frame(&board, deal.id, &TargetId::column(Stage::Won))
//!     .ok_or("target is not on the board")?;
//! let candidates = layout.candidates(&board);
//!
//! board.drag_start(deal.id, layout.card_width())?;
//! board.drag_move(&frame, &candidates);
//! if let Some(DropOutcome::Moved(moved)) = board.finish_drag(&crm, &frame, &candidates).await {
//!     println!("{} is now {}", moved.title, moved.stage);
//! }
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod board;
pub mod calendar;
pub mod crm;
pub mod dashboard;
pub mod db;
pub mod display;
pub mod error;
pub mod goals;
pub mod models;
pub mod params;
pub mod store;

// Re-export commonly used types
pub use access::AccessPolicy;
pub use board::{DeviceMode, DropOutcome, DropPlan, PipelineBoard, TargetId};
pub use crm::{ChangeEvent, Crm, CrmBuilder};
pub use db::Database;
pub use display::{
    Activities, Contacts, CreateResult, Deals, DeleteResult, Mask, Masked, OperationStatus,
    UpdateResult,
};
pub use error::{CrmError, Result};
pub use models::{Activity, ActivitySubject, Contact, Deal, Stage};
pub use params::{
    AddActivity, CalendarMonth, CreateContact, CreateDeal, Delete, Id, ListDeals, MoveDeal,
    SearchContacts, UpdateContact, UpdateDeal,
};
pub use store::DealStore;
