//! Pipeline stage enumeration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four fixed pipeline phases a deal occupies.
///
/// The variants are listed in board order, but any stage may be reached
/// from any other; the board never validates transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Opportunity identified
    #[default]
    Potential,

    /// Offer placed or meeting planned
    Placed,

    /// Deal closed and won
    Won,

    /// Deal lost or declined
    Lost,
}

impl Stage {
    /// All stages in board column order.
    pub const ALL: [Stage; 4] = [Stage::Potential, Stage::Placed, Stage::Won, Stage::Lost];

    /// Database and drop-target identifier for the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Potential => "potential",
            Stage::Placed => "placed",
            Stage::Won => "won",
            Stage::Lost => "lost",
        }
    }

    /// Column heading shown above the stage's deals.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Potential => "Opportunity",
            Stage::Placed => "Planned / Offered",
            Stage::Won => "Won",
            Stage::Lost => "Lost / Declined",
        }
    }

    /// Whether deals in this stage are still being worked on.
    pub fn is_open(&self) -> bool {
        matches!(self, Stage::Potential | Stage::Placed)
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "potential" => Ok(Stage::Potential),
            "placed" => Ok(Stage::Placed),
            "won" => Ok(Stage::Won),
            "lost" => Ok(Stage::Lost),
            _ => Err(format!("Invalid deal stage: {s}")),
        }
    }
}
