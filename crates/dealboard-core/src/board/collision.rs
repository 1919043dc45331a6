//! Collision resolution: which drop target a drag is currently over.
//!
//! A resolver runs an ordered list of strategies and takes the ranking of
//! the first one that finds anything. The default chain is
//!
//! 1. [`rect_intersection`]: targets overlapping the dragged card
//! 2. [`pointer_within`]: targets under the pointer
//! 3. [`closest_center`]: every target, nearest first
//!
//! Every strategy drops the dragged card's own id. The card always overlaps
//! itself and is always nearest to itself, so it would otherwise win every
//! phase.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{
    geometry::{Point, Rect},
    target::TargetId,
};

/// A rendered drop target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: TargetId,
    pub rect: Rect,
}

impl Candidate {
    pub fn new(id: impl Into<TargetId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

impl From<TargetId> for Candidate {
    fn from(id: TargetId) -> Self {
        Self {
            id,
            rect: Rect::default(),
        }
    }
}

/// Geometry of the drag gesture for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragFrame {
    /// Id of the card being dragged. [`crate::board::PipelineBoard`]
    /// replaces it with the card of the deal its session holds.
    pub active: TargetId,
    /// Current bounding rectangle of the dragged card
    pub drag_rect: Rect,
    /// Current pointer position, when the input device reports one
    pub pointer: Option<Point>,
}

impl DragFrame {
    /// The point distances are measured from.
    fn anchor(&self) -> Point {
        self.pointer.unwrap_or_else(|| self.drag_rect.center())
    }
}

/// A pure ranking function over the candidates for one frame.
pub type Strategy = fn(&DragFrame, &[Candidate]) -> Vec<TargetId>;

fn others<'a>(frame: &'a DragFrame, candidates: &'a [Candidate]) -> impl Iterator<Item = &'a Candidate> {
    candidates.iter().filter(move |c| c.id != frame.active)
}

fn ranked(mut scored: Vec<(f64, &Candidate)>, order: fn(&f64, &f64) -> Ordering) -> Vec<TargetId> {
    scored.sort_by(|a, b| order(&a.0, &b.0));
    scored.into_iter().map(|(_, c)| c.id.clone()).collect()
}

/// Targets overlapping the dragged rectangle, largest overlap ratio first.
///
/// The ratio is the shared area over the combined area of both rectangles.
pub fn rect_intersection(frame: &DragFrame, candidates: &[Candidate]) -> Vec<TargetId> {
    let scored = others(frame, candidates)
        .filter_map(|c| {
            let shared = frame.drag_rect.intersection_area(&c.rect);
            if shared <= 0.0 {
                return None;
            }
            let combined = frame.drag_rect.area() + c.rect.area() - shared;
            Some((shared / combined, c))
        })
        .collect();
    ranked(scored, |a, b| b.total_cmp(a))
}

/// Targets containing the pointer, nearest center first. Empty when no
/// pointer is known.
pub fn pointer_within(frame: &DragFrame, candidates: &[Candidate]) -> Vec<TargetId> {
    let Some(pointer) = frame.pointer else {
        return Vec::new();
    };
    let scored = others(frame, candidates)
        .filter(|c| c.rect.contains(pointer))
        .map(|c| (pointer.distance(&c.rect.center()), c))
        .collect();
    ranked(scored, f64::total_cmp)
}

/// Every target, nearest center to the pointer first. Falls back to the
/// center of the dragged rectangle when no pointer is known.
pub fn closest_center(frame: &DragFrame, candidates: &[Candidate]) -> Vec<TargetId> {
    let anchor = frame.anchor();
    let scored = others(frame, candidates)
        .map(|c| (anchor.distance(&c.rect.center()), c))
        .collect();
    ranked(scored, f64::total_cmp)
}

/// Ordered strategy chain; the first non-empty ranking wins.
#[derive(Clone)]
pub struct CollisionResolver {
    strategies: Vec<(&'static str, Strategy)>,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new()
            .with_strategy("rect-intersection", rect_intersection)
            .with_strategy("pointer-within", pointer_within)
            .with_strategy("closest-center", closest_center)
    }
}

impl std::fmt::Debug for CollisionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.strategies.iter().map(|(name, _)| name))
            .finish()
    }
}

impl CollisionResolver {
    /// A resolver with no strategies; it never resolves anything.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Appends a strategy to the end of the chain.
    pub fn with_strategy(mut self, name: &'static str, strategy: Strategy) -> Self {
        self.strategies.push((name, strategy));
        self
    }

    /// Ranking of the first strategy that finds any target.
    pub fn rank(&self, frame: &DragFrame, candidates: &[Candidate]) -> Vec<TargetId> {
        for (name, strategy) in &self.strategies {
            let ranking = strategy(frame, candidates);
            if !ranking.is_empty() {
                log::trace!("{name} matched {} target(s)", ranking.len());
                return ranking;
            }
        }
        Vec::new()
    }

    /// The single target for this frame, if any.
    pub fn resolve(&self, frame: &DragFrame, candidates: &[Candidate]) -> Option<TargetId> {
        self.rank(frame, candidates).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(active: &str, drag_rect: Rect, pointer: Option<Point>) -> DragFrame {
        DragFrame {
            active: TargetId::new(active),
            drag_rect,
            pointer,
        }
    }

    /// Three columns 100px wide, and the dragged card "1" inside column `potential`.
    fn board() -> Vec<Candidate> {
        vec![
            Candidate::new("potential", Rect::new(0.0, 0.0, 100.0, 400.0)),
            Candidate::new("placed", Rect::new(110.0, 0.0, 100.0, 400.0)),
            Candidate::new("won", Rect::new(220.0, 0.0, 100.0, 400.0)),
            Candidate::new("1", Rect::new(10.0, 10.0, 80.0, 40.0)),
            Candidate::new("2", Rect::new(120.0, 10.0, 80.0, 40.0)),
        ]
    }

    #[test]
    fn rect_intersection_ranks_by_overlap_ratio() {
        // Straddles potential and placed, mostly over placed.
        let f = frame("1", Rect::new(80.0, 200.0, 80.0, 40.0), None);
        assert_eq!(
            rect_intersection(&f, &board()),
            vec![TargetId::new("placed"), TargetId::new("potential")]
        );
    }

    #[test]
    fn active_id_is_excluded_from_every_strategy() {
        // Dragged card sitting exactly on its own slot, pointer on it too.
        let slot = Rect::new(10.0, 10.0, 80.0, 40.0);
        let f = frame("1", slot, Some(slot.center()));
        let active = TargetId::new("1");

        for strategy in [rect_intersection, pointer_within, closest_center] {
            assert!(!strategy(&f, &board()).contains(&active));
        }
        assert_ne!(CollisionResolver::default().resolve(&f, &board()), Some(active));
    }

    #[test]
    fn active_only_candidate_set_resolves_nothing() {
        let slot = Rect::new(10.0, 10.0, 80.0, 40.0);
        let f = frame("1", slot, Some(slot.center()));
        let candidates = vec![Candidate::new("1", slot)];
        assert_eq!(CollisionResolver::default().resolve(&f, &candidates), None);
    }

    #[test]
    fn overlap_wins_over_pointer_and_distance() {
        // Rect overlaps only `won`, pointer sits in `potential`.
        let f = frame(
            "1",
            Rect::new(230.0, 300.0, 80.0, 40.0),
            Some(Point::new(50.0, 300.0)),
        );
        let ranking = CollisionResolver::default().rank(&f, &board());
        assert_eq!(ranking, vec![TargetId::new("won")]);
    }

    #[test]
    fn pointer_within_is_used_when_nothing_overlaps() {
        // Zero-size drag rect never overlaps; pointer inside `placed`.
        let f = frame(
            "1",
            Rect::new(500.0, 500.0, 0.0, 0.0),
            Some(Point::new(150.0, 300.0)),
        );
        assert_eq!(
            CollisionResolver::default().resolve(&f, &board()),
            Some(TargetId::new("placed"))
        );
    }

    #[test]
    fn closest_center_is_the_last_resort() {
        // Everything is off to the right of the board.
        let f = frame(
            "1",
            Rect::new(600.0, 190.0, 0.0, 0.0),
            Some(Point::new(600.0, 200.0)),
        );
        assert!(rect_intersection(&f, &board()).is_empty());
        assert!(pointer_within(&f, &board()).is_empty());
        assert_eq!(
            CollisionResolver::default().resolve(&f, &board()),
            Some(TargetId::new("won"))
        );
    }

    #[test]
    fn closest_center_without_pointer_uses_drag_rect() {
        let f = frame("1", Rect::new(110.0, 180.0, 100.0, 40.0), None);
        assert_eq!(
            closest_center(&f, &board()).first(),
            Some(&TargetId::new("placed"))
        );
    }

    #[test]
    fn empty_candidate_set_resolves_nothing() {
        let f = frame("1", Rect::new(0.0, 0.0, 10.0, 10.0), Some(Point::new(5.0, 5.0)));
        assert_eq!(CollisionResolver::default().resolve(&f, &[]), None);
        assert_eq!(CollisionResolver::new().resolve(&f, &board()), None);
    }

    #[test]
    fn custom_chain_runs_in_order() {
        let f = frame(
            "1",
            Rect::new(230.0, 300.0, 80.0, 40.0),
            Some(Point::new(50.0, 300.0)),
        );
        let pointer_first = CollisionResolver::new()
            .with_strategy("pointer-within", pointer_within)
            .with_strategy("rect-intersection", rect_intersection);
        assert_eq!(
            pointer_first.resolve(&f, &board()),
            Some(TargetId::new("potential"))
        );
    }
}
