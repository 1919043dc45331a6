//! Pipeline board engine: deals grouped by stage and moved between stages
//! by drag and drop.
//!
//! ```text
//! gesture start ──▶ DragSession::Dragging
//! pointer move  ──▶ CollisionResolver ──▶ highlighted TargetId
//! release       ──▶ CollisionResolver ──▶ classify ──▶ DropPlan
//!                                                        │ Move
//!                                                        ▼
//!                                      PendingMove::commit(DealStore)
//! ```
//!
//! Only a release can write, and only when the resolved stage differs from
//! the deal's current one. Any stage may follow any other.
//!
//! ```rust
//! use dealboard_core::board::{BoardLayout, DeviceMode, DropPlan, PipelineBoard, TargetId};
//! # use dealboard_core::models::{Deal, Stage};
//! # let deal = Deal {
//! #     id: 1, title: "Roof".into(), contact_id: 1, value: 100.0,
//! #     currency: "SEK".into(), stage: Stage::Potential, expected_close_date: None,
//! #     notes: None, follow_up: false, created_by: None,
//! #     created_at: jiff::Timestamp::UNIX_EPOCH, updated_at: jiff::Timestamp::UNIX_EPOCH,
//! # };
//!
//! let mut board = PipelineBoard::new(DeviceMode::Desktop);
//! board.set_deals(vec![deal]);
//!
//! let layout = BoardLayout::default();
//! let candidates = layout.candidates(&board);
//! let frame = layout.drop_frame(&board, 1, &TargetId::column(Stage::Won)).unwrap();
//!
//! board.drag_start(1, layout.card_width()).unwrap();
//! match board.release(&frame, &candidates) {
//!     DropPlan::Move(pending) => assert_eq!(pending.to_stage(), Stage::Won),
//!     other => panic!("unexpected plan {other:?}"),
//! }
//! assert!(board.session().is_idle());
//! ```

pub mod collision;
pub mod geometry;
pub mod layout;
pub mod pipeline;
pub mod session;
pub mod target;

#[cfg(test)]
mod tests;

pub use collision::{Candidate, CollisionResolver, DragFrame, Strategy};
pub use geometry::{Point, Rect};
pub use layout::BoardLayout;
pub use pipeline::{BoardColumn, DropOutcome, DropPlan, PendingMove, PipelineBoard};
pub use session::DragSession;
pub use target::{classify, DeviceMode, TargetId};
