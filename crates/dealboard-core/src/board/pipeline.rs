//! The pipeline board: deals grouped by stage, moved by drag and drop.

use std::collections::HashMap;

use serde::Serialize;

use super::{
    collision::{Candidate, CollisionResolver, DragFrame},
    session::DragSession,
    target::{classify, DeviceMode, TargetId},
};
use crate::{
    error::Result,
    models::{Contact, Deal, Stage},
    store::DealStore,
};

/// One stage column as rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardColumn {
    pub stage: Stage,
    pub deals: Vec<Deal>,
    /// Sum of the column's deal values
    pub total: f64,
}

/// What a release decided, before anything is persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum DropPlan {
    /// Released over nothing, over an unknown id, or the dragged deal is
    /// gone from the snapshot.
    NoTarget,
    /// Released over the deal's own stage.
    Unchanged { deal_id: u64, stage: Stage },
    /// The deal should join another stage.
    Move(PendingMove),
}

/// A stage change waiting to be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    deal: Deal,
    from: Stage,
}

/// Result of writing a [`PendingMove`].
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The store accepted the write and returned this record.
    Moved(Deal),
    /// The store rejected the write. The board keeps the last stage the
    /// store reported.
    Failed {
        deal_id: u64,
        stage: Stage,
        message: String,
    },
}

impl PendingMove {
    /// The full record to write, with only the stage changed.
    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    pub fn from_stage(&self) -> Stage {
        self.from
    }

    pub fn to_stage(&self) -> Stage {
        self.deal.stage
    }

    /// Writes the move. Store errors are logged and returned as
    /// [`DropOutcome::Failed`], never propagated.
    pub async fn commit<S: DealStore>(self, store: &S) -> DropOutcome {
        let (deal_id, stage) = (self.deal.id, self.deal.stage);

        match store.update_deal(&self.deal).await {
            Ok(stored) => {
                log::info!("Moved deal {deal_id} from {} to {}", self.from.as_str(), stage.as_str());
                DropOutcome::Moved(stored)
            }
            Err(e) => {
                log::warn!("Failed to move deal {deal_id} to {}: {e}", stage.as_str());
                DropOutcome::Failed {
                    deal_id,
                    stage,
                    message: e.to_string(),
                }
            }
        }
    }
}

/// Board state: the deal snapshot, layout mode and the drag in progress.
///
/// The board never fetches on its own initiative. Its owner hands it a
/// fresh snapshot with [`set_deals`](Self::set_deals) (or
/// [`refresh`](Self::refresh)) whenever the store reports a change.
///
/// A drop runs in two halves so the gesture can finish before the write
/// does: [`release`](Self::release) returns the session to idle and plans
/// the move synchronously, then [`PendingMove::commit`] writes it and
/// [`apply_outcome`](Self::apply_outcome) folds the result back in.
#[derive(Debug, Clone, Default)]
pub struct PipelineBoard {
    deals: Vec<Deal>,
    contact_names: HashMap<u64, String>,
    mode: DeviceMode,
    active_column: Stage,
    session: DragSession,
    resolver: CollisionResolver,
}

impl PipelineBoard {
    pub fn new(mode: DeviceMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Replaces the collision strategy chain.
    pub fn with_resolver(mut self, resolver: CollisionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the deal snapshot wholesale.
    pub fn set_deals(&mut self, deals: Vec<Deal>) {
        self.deals = deals;
    }

    /// Replaces the contacts used for counterparty names.
    pub fn set_contacts(&mut self, contacts: Vec<Contact>) {
        self.contact_names = contacts.into_iter().map(|c| (c.id, c.name)).collect();
    }

    /// Re-lists deals and contacts from the store.
    pub async fn refresh<S: DealStore>(&mut self, store: &S) -> Result<()> {
        let deals = store.list_deals().await?;
        let contacts = store.list_contacts().await?;
        log::debug!("Board refreshed with {} deals", deals.len());
        self.set_deals(deals);
        self.set_contacts(contacts);
        Ok(())
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn deal(&self, id: u64) -> Option<&Deal> {
        self.deals.iter().find(|d| d.id == id)
    }

    /// Name of the contact a deal is negotiated with.
    pub fn contact_name(&self, deal: &Deal) -> Option<&str> {
        self.contact_names.get(&deal.contact_id).map(String::as_str)
    }

    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DeviceMode) {
        self.mode = mode;
    }

    /// Column shown in narrow mode.
    pub fn active_column(&self) -> Stage {
        self.active_column
    }

    pub fn select_column(&mut self, stage: Stage) {
        self.active_column = stage;
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// All four columns in board order, each with its deals and total.
    pub fn columns(&self) -> Vec<BoardColumn> {
        Stage::ALL.into_iter().map(|s| self.column(s)).collect()
    }

    /// Columns on screen: all of them on desktop, the active one when narrow.
    pub fn visible_columns(&self) -> Vec<BoardColumn> {
        match self.mode {
            DeviceMode::Desktop => self.columns(),
            DeviceMode::Narrow => vec![self.column(self.active_column)],
        }
    }

    fn column(&self, stage: Stage) -> BoardColumn {
        let deals: Vec<Deal> = self
            .deals
            .iter()
            .filter(|d| d.stage == stage)
            .cloned()
            .collect();
        let total = deals.iter().map(|d| d.value).sum();
        BoardColumn { stage, deals, total }
    }

    /// Ids of every drop target the renderer shows in the current mode.
    ///
    /// Narrow mode adds a chip per stage; chips for hidden columns still
    /// accept drops.
    pub fn drop_targets(&self) -> Vec<TargetId> {
        let visible = self.visible_columns();
        let mut targets: Vec<TargetId> = Vec::new();
        if self.mode == DeviceMode::Narrow {
            targets.extend(Stage::ALL.into_iter().map(TargetId::narrow_zone));
        }
        for column in &visible {
            targets.push(TargetId::column(column.stage));
            targets.extend(column.deals.iter().map(|d| TargetId::card(d.id)));
        }
        targets
    }

    /// Starts dragging a deal's card.
    ///
    /// # Errors
    ///
    /// Returns `CrmError::DragInProgress` if another drag is active.
    pub fn drag_start(&mut self, deal_id: u64, captured_width: f64) -> Result<()> {
        self.session.start(deal_id, captured_width)
    }

    /// Re-resolves the target under the drag and returns it for
    /// highlighting. Never touches a deal.
    pub fn drag_move(&mut self, frame: &DragFrame, candidates: &[Candidate]) -> Option<&TargetId> {
        let deal_id = self.session.active_deal()?;
        let target = self.resolver.resolve(&dragging(deal_id, frame), candidates);
        self.session.hover(target);
        self.session.over()
    }

    /// Abandons the drag; nothing is written.
    pub fn drag_cancel(&mut self) {
        self.session.cancel();
    }

    /// Ends the drag and decides what the drop means.
    ///
    /// The session is idle when this returns, whatever the plan.
    pub fn release(&mut self, frame: &DragFrame, candidates: &[Candidate]) -> DropPlan {
        let Some(deal_id) = self.session.release() else {
            return DropPlan::NoTarget;
        };
        let Some(target) = self.resolver.resolve(&dragging(deal_id, frame), candidates) else {
            log::debug!("Deal {deal_id} released over no target");
            return DropPlan::NoTarget;
        };
        let Some(stage) = classify(&target, &self.deals) else {
            return DropPlan::NoTarget;
        };
        let Some(deal) = self.deal(deal_id) else {
            log::debug!("Deal {deal_id} is no longer on the board");
            return DropPlan::NoTarget;
        };

        if deal.stage == stage {
            DropPlan::Unchanged { deal_id, stage }
        } else {
            DropPlan::Move(PendingMove {
                deal: deal.with_stage(stage),
                from: deal.stage,
            })
        }
    }

    /// Folds a committed move back into the board.
    ///
    /// A successful move replaces the deal in the snapshot, and in narrow
    /// mode switches to the destination column so the card stays in view.
    /// A failed move changes nothing.
    pub fn apply_outcome(&mut self, outcome: &DropOutcome) {
        let DropOutcome::Moved(stored) = outcome else {
            return;
        };
        if let Some(slot) = self.deals.iter_mut().find(|d| d.id == stored.id) {
            *slot = stored.clone();
        }
        if self.mode == DeviceMode::Narrow {
            self.active_column = stored.stage;
        }
    }

    /// Releases, commits and applies in one call. Returns `None` when no
    /// write was attempted.
    pub async fn finish_drag<S: DealStore>(
        &mut self,
        store: &S,
        frame: &DragFrame,
        candidates: &[Candidate],
    ) -> Option<DropOutcome> {
        let DropPlan::Move(pending) = self.release(frame, candidates) else {
            return None;
        };
        let outcome = pending.commit(store).await;
        self.apply_outcome(&outcome);
        Some(outcome)
    }
}

/// `frame` with the dragged card taken from the session, so the card can
/// never resolve as its own target whatever the caller put in `active`.
fn dragging(deal_id: u64, frame: &DragFrame) -> DragFrame {
    DragFrame {
        active: TargetId::card(deal_id),
        ..frame.clone()
    }
}
