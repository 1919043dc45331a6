//! Lifecycle of a single drag gesture.

use super::target::TargetId;
use crate::error::{CrmError, Result};

/// Drag state of the board.
///
/// ```text
///          start                 release / cancel
///   Idle ─────────▶ Dragging ──────────────────────▶ Idle
///                    │    ▲
///                    └────┘ hover
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging {
        /// Deal whose card is being dragged
        deal_id: u64,
        /// Rendered card width at drag start, used to size the ghost
        captured_width: f64,
        /// Target under the drag in the latest frame, for highlighting
        over: Option<TargetId>,
    },
}

impl DragSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragSession::Idle)
    }

    /// Deal being dragged, if any.
    pub fn active_deal(&self) -> Option<u64> {
        match self {
            DragSession::Idle => None,
            DragSession::Dragging { deal_id, .. } => Some(*deal_id),
        }
    }

    pub fn captured_width(&self) -> Option<f64> {
        match self {
            DragSession::Idle => None,
            DragSession::Dragging { captured_width, .. } => Some(*captured_width),
        }
    }

    /// Target highlighted in the latest frame.
    pub fn over(&self) -> Option<&TargetId> {
        match self {
            DragSession::Idle => None,
            DragSession::Dragging { over, .. } => over.as_ref(),
        }
    }

    /// Begins dragging `deal_id`.
    ///
    /// # Errors
    ///
    /// Returns `CrmError::DragInProgress` if a drag is already active; the
    /// running drag is left untouched.
    pub fn start(&mut self, deal_id: u64, captured_width: f64) -> Result<()> {
        if let Some(active) = self.active_deal() {
            return Err(CrmError::DragInProgress { id: active });
        }
        log::debug!("Drag started for deal {deal_id}");
        *self = DragSession::Dragging {
            deal_id,
            captured_width,
            over: None,
        };
        Ok(())
    }

    /// Records the target under the drag. Ignored while idle.
    pub fn hover(&mut self, target: Option<TargetId>) {
        if let DragSession::Dragging { over, .. } = self {
            *over = target;
        }
    }

    /// Ends the drag and returns the dragged deal, if there was one.
    pub fn release(&mut self) -> Option<u64> {
        let deal_id = std::mem::take(self).active_deal();
        if let Some(id) = deal_id {
            log::debug!("Drag released for deal {id}");
        }
        deal_id
    }

    /// Abandons the drag without a drop. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        let cancelled = std::mem::take(self).active_deal();
        if let Some(id) = cancelled {
            log::debug!("Drag cancelled for deal {id}");
        }
        cancelled.is_some()
    }
}
