//! Drop-target identifiers and the stage classifier.
//!
//! The renderer tags every drop target with an opaque string:
//!
//! - a column: the stage id, e.g. `won`
//! - a narrow-mode drop zone: the stage id behind a device-mode prefix,
//!   e.g. `mobile-won`
//! - a card: the decimal id of the deal it shows, e.g. `42`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Deal, Stage};

/// Prefix of the stage chips that act as drop zones on narrow viewports.
pub const NARROW_ZONE_PREFIX: &str = "mobile-";

/// Viewports narrower than this many pixels use the single-column layout.
pub const NARROW_BREAKPOINT: f64 = 768.0;

/// How the board is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceMode {
    /// All columns visible side by side
    #[default]
    Desktop,
    /// One column at a time, switched with stage chips
    Narrow,
}

impl DeviceMode {
    pub fn for_viewport_width(width: f64) -> Self {
        if width < NARROW_BREAKPOINT {
            DeviceMode::Narrow
        } else {
            DeviceMode::Desktop
        }
    }
}

/// Opaque identifier of a drop target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The column holding `stage`.
    pub fn column(stage: Stage) -> Self {
        Self(stage.as_str().to_string())
    }

    /// The narrow-mode chip for `stage`.
    pub fn narrow_zone(stage: Stage) -> Self {
        Self(format!("{NARROW_ZONE_PREFIX}{}", stage.as_str()))
    }

    /// The card showing the deal with `deal_id`.
    pub fn card(deal_id: u64) -> Self {
        Self(deal_id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The stage this id names, if it is a column or drop zone.
    pub fn stage(&self) -> Option<Stage> {
        let bare = self
            .0
            .strip_prefix(NARROW_ZONE_PREFIX)
            .unwrap_or(&self.0);
        Stage::ALL.into_iter().find(|s| s.as_str() == bare)
    }

    /// The deal id this id names, if it is a card. Only the canonical
    /// decimal form counts, so `007` and `+7` are not card 7.
    pub fn deal_id(&self) -> Option<u64> {
        let id: u64 = self.0.parse().ok()?;
        (id.to_string() == self.0).then_some(id)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Maps a drop target to the stage a dropped deal should join.
///
/// Columns and drop zones name their stage directly. Dropping onto a card
/// means joining that card's column, so a card id resolves to the current
/// stage of its deal in `deals`. Anything else resolves to `None`.
pub fn classify(target: &TargetId, deals: &[Deal]) -> Option<Stage> {
    if let Some(stage) = target.stage() {
        return Some(stage);
    }

    let stage = target
        .deal_id()
        .and_then(|id| deals.iter().find(|d| d.id == id))
        .map(|deal| deal.stage);
    if stage.is_none() {
        log::debug!("Drop target '{target}' matches no stage or deal");
    }
    stage
}
