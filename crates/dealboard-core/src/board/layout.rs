//! Reference layout of the board, used to turn target ids into rectangles
//! when no renderer is around to measure them (the CLI, tests).

use super::{
    collision::{Candidate, DragFrame},
    geometry::Rect,
    pipeline::PipelineBoard,
    target::{DeviceMode, TargetId},
};
use crate::models::Stage;

/// Fixed pixel metrics of the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub column_width: f64,
    pub column_gap: f64,
    pub header_height: f64,
    pub card_height: f64,
    pub card_gap: f64,
    /// Height of the stage chip row in narrow mode
    pub chip_height: f64,
    /// Minimum column height, so empty columns still catch drops
    pub min_column_height: f64,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            column_width: 280.0,
            column_gap: 16.0,
            header_height: 48.0,
            card_height: 96.0,
            card_gap: 8.0,
            chip_height: 40.0,
            min_column_height: 400.0,
        }
    }
}

impl BoardLayout {
    /// Width of a card inside a column.
    pub fn card_width(&self) -> f64 {
        self.column_width - 2.0 * self.card_gap
    }

    /// Rectangles of every drop target on the board, in
    /// [`PipelineBoard::drop_targets`] order.
    pub fn candidates(&self, board: &PipelineBoard) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let top = match board.mode() {
            DeviceMode::Desktop => 0.0,
            DeviceMode::Narrow => {
                let chip_width = self.column_width / Stage::ALL.len() as f64;
                for (i, stage) in Stage::ALL.into_iter().enumerate() {
                    let rect = Rect::new(i as f64 * chip_width, 0.0, chip_width, self.chip_height);
                    candidates.push(Candidate::new(TargetId::narrow_zone(stage), rect));
                }
                self.chip_height + self.card_gap
            }
        };

        for (i, column) in board.visible_columns().iter().enumerate() {
            let x = i as f64 * (self.column_width + self.column_gap);
            let stacked = self.header_height
                + column.deals.len() as f64 * (self.card_height + self.card_gap);
            let height = stacked.max(self.min_column_height);
            candidates.push(Candidate::new(
                TargetId::column(column.stage),
                Rect::new(x, top, self.column_width, height),
            ));

            for (j, deal) in column.deals.iter().enumerate() {
                let y = top + self.header_height + j as f64 * (self.card_height + self.card_gap);
                candidates.push(Candidate::new(
                    TargetId::card(deal.id),
                    Rect::new(x + self.card_gap, y, self.card_width(), self.card_height),
                ));
            }
        }
        candidates
    }

    /// Frame of a drag released over the middle of `target`, with the
    /// ghost shrunk to fit inside it so no neighbour is overlapped.
    pub fn drop_frame(&self, board: &PipelineBoard, deal_id: u64, target: &TargetId) -> Option<DragFrame> {
        let rect = self
            .candidates(board)
            .into_iter()
            .find(|c| &c.id == target)?
            .rect;
        let pointer = rect.center();
        let width = self.card_width().min(rect.width / 2.0);
        let height = self.card_height.min(rect.height / 2.0);

        Some(DragFrame {
            active: TargetId::card(deal_id),
            drag_rect: Rect::centered_at(pointer, width, height),
            pointer: Some(pointer),
        })
    }
}
