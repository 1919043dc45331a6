//! Headline numbers for the dashboard.

use serde::Serialize;

use crate::models::{Deal, Stage};

/// How many deals the dashboard lists.
pub const TOP_DEAL_COUNT: usize = 5;

/// Pipeline summary computed from a deal snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    /// Sum of every deal not lost
    pub pipeline_value: f64,
    /// Deals neither won nor lost
    pub active_deals: usize,
    pub won_deals: usize,
    /// Sum of won deals, the figure revenue goals are measured against
    pub won_value: f64,
    /// Largest deals not lost, biggest first
    pub top_deals: Vec<Deal>,
}

impl DashboardMetrics {
    pub fn from_deals(deals: &[Deal]) -> Self {
        let not_lost = || deals.iter().filter(|d| d.stage != Stage::Lost);

        let mut top_deals: Vec<Deal> = not_lost().cloned().collect();
        top_deals.sort_by(|a, b| b.value.total_cmp(&a.value));
        top_deals.truncate(TOP_DEAL_COUNT);

        Self {
            pipeline_value: not_lost().map(|d| d.value).sum(),
            active_deals: deals.iter().filter(|d| d.stage.is_open()).count(),
            won_deals: deals.iter().filter(|d| d.stage == Stage::Won).count(),
            won_value: deals
                .iter()
                .filter(|d| d.stage == Stage::Won)
                .map(|d| d.value)
                .sum(),
            top_deals,
        }
    }
}
