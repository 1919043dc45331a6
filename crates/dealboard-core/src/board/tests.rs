//! Drag-and-drop scenarios against an in-memory store.

use std::sync::Mutex;

use jiff::Timestamp;

use super::*;
use crate::{
    error::{CrmError, Result},
    models::{Contact, Deal, Stage},
    store::DealStore,
};

pub(super) fn deal(id: u64, stage: Stage) -> Deal {
    Deal {
        id,
        title: format!("Deal {id}"),
        contact_id: 1,
        value: 1000.0 * id as f64,
        currency: "SEK".to_string(),
        stage,
        expected_close_date: None,
        notes: Some("call back after lunch".to_string()),
        follow_up: id % 2 == 0,
        created_by: Some("anna@example.com".to_string()),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Records every update and optionally rejects them.
#[derive(Default)]
struct FakeStore {
    deals: Vec<Deal>,
    contacts: Vec<Contact>,
    updates: Mutex<Vec<Deal>>,
    reject: bool,
}

impl FakeStore {
    fn with_deals(deals: Vec<Deal>) -> Self {
        Self {
            deals,
            ..Self::default()
        }
    }

    fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    fn updates(&self) -> Vec<Deal> {
        self.updates.lock().unwrap().clone()
    }
}

impl DealStore for FakeStore {
    async fn list_deals(&self) -> Result<Vec<Deal>> {
        Ok(self.deals.clone())
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        Ok(self.contacts.clone())
    }

    async fn update_deal(&self, deal: &Deal) -> Result<Deal> {
        self.updates.lock().unwrap().push(deal.clone());
        if self.reject {
            return Err(CrmError::Configuration {
                message: "backend rejected the write".to_string(),
            });
        }
        Ok(deal.clone())
    }
}

fn desktop_board(deals: Vec<Deal>) -> PipelineBoard {
    let mut board = PipelineBoard::new(DeviceMode::Desktop);
    board.set_deals(deals);
    board
}

/// Drags `deal_id` and releases it over the middle of `target`.
async fn drop_on(board: &mut PipelineBoard, store: &FakeStore, deal_id: u64, target: TargetId) -> Option<DropOutcome> {
    let layout = BoardLayout::default();
    let candidates = layout.candidates(board);
    let frame = layout
        .drop_frame(board, deal_id, &target)
        .expect("target is on the board");

    board.drag_start(deal_id, layout.card_width()).unwrap();
    board.drag_move(&frame, &candidates);
    board.finish_drag(store, &frame, &candidates).await
}

#[tokio::test]
async fn drop_on_own_column_writes_nothing() {
    let store = FakeStore::default();
    let mut board = desktop_board(vec![deal(1, Stage::Placed), deal(2, Stage::Won)]);

    let outcome = drop_on(&mut board, &store, 1, TargetId::column(Stage::Placed)).await;

    assert_eq!(outcome, None);
    assert!(store.updates().is_empty());
    assert!(board.session().is_idle());
}

#[tokio::test]
async fn drop_potential_on_won_writes_full_record_once() {
    let store = FakeStore::default();
    let before = deal(1, Stage::Potential);
    let mut board = desktop_board(vec![before.clone()]);

    let outcome = drop_on(&mut board, &store, 1, TargetId::column(Stage::Won)).await;

    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0], Deal { stage: Stage::Won, ..before });
    assert!(matches!(outcome, Some(DropOutcome::Moved(ref d)) if d.stage == Stage::Won));
    assert_eq!(board.deal(1).unwrap().stage, Stage::Won);
}

#[tokio::test]
async fn drop_on_card_joins_its_column() {
    let store = FakeStore::default();
    let mut board = desktop_board(vec![deal(1, Stage::Potential), deal(2, Stage::Lost)]);

    drop_on(&mut board, &store, 1, TargetId::card(2)).await;

    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].id, 1);
    assert_eq!(updates[0].stage, Stage::Lost);
}

#[tokio::test]
async fn release_over_empty_space_writes_nothing() {
    let store = FakeStore::default();
    let mut board = desktop_board(vec![deal(1, Stage::Potential)]);
    let frame = DragFrame {
        active: TargetId::card(1),
        drag_rect: Rect::new(5000.0, 5000.0, 10.0, 10.0),
        pointer: Some(Point::new(5005.0, 5005.0)),
    };

    board.drag_start(1, 264.0).unwrap();
    // Nothing is rendered, so even closest-center has no candidates.
    let outcome = board.finish_drag(&store, &frame, &[]).await;

    assert_eq!(outcome, None);
    assert!(store.updates().is_empty());
    assert_eq!(board.deal(1).unwrap().stage, Stage::Potential);
    assert!(board.session().is_idle());
}

#[tokio::test]
async fn cancelled_drag_writes_nothing() {
    let store = FakeStore::default();
    let mut board = desktop_board(vec![deal(1, Stage::Potential)]);
    let layout = BoardLayout::default();
    let candidates = layout.candidates(&board);
    let frame = layout
        .drop_frame(&board, 1, &TargetId::column(Stage::Won))
        .unwrap();

    board.drag_start(1, layout.card_width()).unwrap();
    assert_eq!(
        board.drag_move(&frame, &candidates),
        Some(&TargetId::column(Stage::Won))
    );
    board.drag_cancel();

    assert!(board.session().is_idle());
    // A release after the cancel has no drag to finish.
    assert_eq!(board.finish_drag(&store, &frame, &candidates).await, None);
    assert!(store.updates().is_empty());
}

#[tokio::test]
async fn end_to_end_drop_on_lost_column() {
    let store = FakeStore::default();
    let d1 = deal(1, Stage::Potential);
    let d2 = deal(2, Stage::Placed);
    let mut board = desktop_board(vec![d1.clone(), d2.clone()]);

    drop_on(&mut board, &store, 1, TargetId::column(Stage::Lost)).await;

    assert_eq!(store.updates(), vec![Deal { stage: Stage::Lost, ..d1 }]);
    assert_eq!(board.deal(2), Some(&d2));
    assert_eq!(board.session(), &DragSession::Idle);
}

#[tokio::test]
async fn dragged_deal_removed_mid_drag_writes_nothing() {
    let store = FakeStore::default();
    let mut board = desktop_board(vec![deal(1, Stage::Potential), deal(2, Stage::Placed)]);
    let layout = BoardLayout::default();
    let candidates = layout.candidates(&board);
    let frame = layout
        .drop_frame(&board, 1, &TargetId::column(Stage::Won))
        .unwrap();

    board.drag_start(1, layout.card_width()).unwrap();
    // Someone else deleted deal 1; the page re-listed.
    board.set_deals(vec![deal(2, Stage::Placed)]);

    assert_eq!(board.release(&frame, &candidates), DropPlan::NoTarget);
    assert!(store.updates().is_empty());
}

#[tokio::test]
async fn rejected_write_is_reported_not_rolled_forward() {
    let store = FakeStore::rejecting();
    let mut board = PipelineBoard::new(DeviceMode::Narrow);
    board.set_deals(vec![deal(1, Stage::Potential)]);

    let outcome = drop_on(&mut board, &store, 1, TargetId::narrow_zone(Stage::Won)).await;

    assert!(matches!(
        outcome,
        Some(DropOutcome::Failed { deal_id: 1, stage: Stage::Won, .. })
    ));
    assert_eq!(store.updates().len(), 1);
    assert_eq!(board.deal(1).unwrap().stage, Stage::Potential);
    assert_eq!(board.active_column(), Stage::Potential);
    assert!(board.session().is_idle());
}

#[tokio::test]
async fn narrow_drop_switches_to_destination_column() {
    let store = FakeStore::default();
    let mut board = PipelineBoard::new(DeviceMode::Narrow);
    board.set_deals(vec![deal(1, Stage::Potential), deal(2, Stage::Won)]);

    // Won is off screen; its chip still takes the drop.
    assert!(!board.drop_targets().contains(&TargetId::column(Stage::Won)));
    assert!(board.drop_targets().contains(&TargetId::narrow_zone(Stage::Won)));

    drop_on(&mut board, &store, 1, TargetId::narrow_zone(Stage::Won)).await;

    assert_eq!(board.active_column(), Stage::Won);
    let visible = board.visible_columns();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].deals.len(), 2);
}

#[tokio::test]
async fn desktop_drop_keeps_active_column() {
    let store = FakeStore::default();
    let mut board = desktop_board(vec![deal(1, Stage::Potential)]);

    drop_on(&mut board, &store, 1, TargetId::column(Stage::Placed)).await;

    assert_eq!(board.active_column(), Stage::Potential);
}

#[tokio::test]
async fn backward_moves_are_allowed() {
    let store = FakeStore::default();
    let mut board = desktop_board(vec![deal(1, Stage::Won)]);

    drop_on(&mut board, &store, 1, TargetId::column(Stage::Potential)).await;

    assert_eq!(store.updates()[0].stage, Stage::Potential);
}

#[tokio::test]
async fn second_drag_can_start_before_write_completes() {
    let store = FakeStore::default();
    let mut board = desktop_board(vec![deal(1, Stage::Potential), deal(2, Stage::Potential)]);
    let layout = BoardLayout::default();
    let candidates = layout.candidates(&board);
    let frame = layout
        .drop_frame(&board, 1, &TargetId::column(Stage::Won))
        .unwrap();

    board.drag_start(1, layout.card_width()).unwrap();
    let DropPlan::Move(pending) = board.release(&frame, &candidates) else {
        panic!("expected a move");
    };

    // The gesture is over before the write is sent.
    board.drag_start(2, layout.card_width()).unwrap();
    let outcome = pending.commit(&store).await;
    board.apply_outcome(&outcome);

    assert_eq!(board.session().active_deal(), Some(2));
    assert_eq!(board.deal(1).unwrap().stage, Stage::Won);
}

#[tokio::test]
async fn refresh_loads_deals_and_contact_names() {
    let mut store = FakeStore::with_deals(vec![deal(1, Stage::Placed)]);
    store.contacts = vec![Contact {
        id: 1,
        name: "Erik Svensson".to_string(),
        ..Default::default()
    }];
    let mut board = PipelineBoard::default();

    board.refresh(&store).await.unwrap();

    let d = board.deal(1).unwrap();
    assert_eq!(board.contact_name(d), Some("Erik Svensson"));
}

#[test]
fn columns_group_deals_with_totals() {
    let board = desktop_board(vec![
        deal(1, Stage::Potential),
        deal(2, Stage::Potential),
        deal(3, Stage::Won),
    ]);

    let columns = board.columns();
    assert_eq!(
        columns.iter().map(|c| c.stage).collect::<Vec<_>>(),
        Stage::ALL.to_vec()
    );
    assert_eq!(columns[0].deals.len(), 2);
    assert_eq!(columns[0].total, 3000.0);
    assert_eq!(columns[1].total, 0.0);
    assert_eq!(columns[2].total, 3000.0);
}

#[test]
fn drag_move_while_idle_highlights_nothing() {
    let mut board = desktop_board(vec![deal(1, Stage::Potential)]);
    let layout = BoardLayout::default();
    let candidates = layout.candidates(&board);
    let frame = layout
        .drop_frame(&board, 1, &TargetId::column(Stage::Won))
        .unwrap();

    assert_eq!(board.drag_move(&frame, &candidates), None);
}

#[test]
fn dragged_card_is_never_its_own_target() {
    let mut board = desktop_board(vec![deal(1, Stage::Potential), deal(2, Stage::Potential)]);
    let layout = BoardLayout::default();
    let candidates = layout.candidates(&board);
    // Hovering over deal 1's own slot while the frame names another card
    let frame = layout.drop_frame(&board, 2, &TargetId::card(1)).unwrap();
    assert_eq!(frame.active, TargetId::card(2));

    board.drag_start(1, layout.card_width()).unwrap();
    let over = board.drag_move(&frame, &candidates).cloned();
    assert_eq!(over, Some(TargetId::column(Stage::Potential)));

    assert_eq!(
        board.release(&frame, &candidates),
        DropPlan::Unchanged {
            deal_id: 1,
            stage: Stage::Potential
        }
    );
    assert!(board.session().is_idle());
}
