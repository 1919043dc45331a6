//! One-line feedback for commands that leave no record to show: drops
//! that write nothing, diary deletions.

use std::fmt;

use crate::board::DropPlan;

/// A `Success:` or `Error:` line.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }

    /// Feedback for a release that writes nothing. A planned move has no
    /// status of its own; its stored deal is shown once the write lands.
    pub fn for_drop(plan: &DropPlan) -> Option<Self> {
        match plan {
            DropPlan::NoTarget => Some(Self::failure("Dropped outside any stage; nothing changed")),
            DropPlan::Unchanged { deal_id, stage } => Some(Self::success(format!(
                "Deal {deal_id} is already in {}; nothing changed",
                stage.label()
            ))),
            DropPlan::Move(_) => None,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stage;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Deleted activity 3 from deal 1");
        assert_eq!(success.to_string(), "Success: Deleted activity 3 from deal 1\n");

        let failure = OperationStatus::failure("Store rejected the move");
        assert!(failure.to_string().starts_with("Error:"));
    }

    #[test]
    fn test_drop_feedback() {
        let missed = OperationStatus::for_drop(&DropPlan::NoTarget).unwrap();
        assert!(!missed.success);
        assert!(missed.message.contains("outside any stage"));

        let same = OperationStatus::for_drop(&DropPlan::Unchanged {
            deal_id: 4,
            stage: Stage::Placed,
        })
        .unwrap();
        assert_eq!(
            same.to_string(),
            "Success: Deal 4 is already in Planned / Offered; nothing changed\n"
        );
    }
}
