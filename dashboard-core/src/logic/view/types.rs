//! View Types
//!
//! Parameters owned by the host, pipeline options, and the render-ready
//! view model produced for one dashboard view.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::aggregate::{
    DailyVolume, LabeledCounts, LatencyAverages, ReviewTimeline, SeverityAutomation,
    SeverityDistribution, SuccessRate,
};
use crate::logic::categorize::CategoryGrouping;

// ============================================================================
// ACTIVE VIEW (state machine states)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    #[default]
    Incident,
    Performance,
    Health,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [ActiveView::Incident, ActiveView::Performance, ActiveView::Health];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "incident" => Some(ActiveView::Incident),
            "performance" => Some(ActiveView::Performance),
            "health" => Some(ActiveView::Health),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveView::Incident => "incident",
            ActiveView::Performance => "performance",
            ActiveView::Health => "health",
        }
    }
}

impl std::fmt::Display for ActiveView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PARAMETERS & OPTIONS
// ============================================================================

/// User-selected parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardParams {
    /// Trailing day window requested from the snapshot source
    pub days: u32,
    /// Free-text record filter
    pub filter_text: String,
    pub active_view: ActiveView,
    pub auto_refresh_enabled: bool,
    pub refresh_interval_secs: u64,
}

impl Default for DashboardParams {
    fn default() -> Self {
        Self {
            days: constants::get_default_days(),
            filter_text: String::new(),
            active_view: ActiveView::default(),
            auto_refresh_enabled: constants::is_auto_refresh_enabled(),
            refresh_interval_secs: constants::get_refresh_interval(),
        }
    }
}

/// Deployment-level choices for how views group and pad their data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Finding-type grouping used by the performance view
    pub category_grouping: CategoryGrouping,
    /// Report the `Unknown` severity bucket
    pub include_unknown_severity: bool,
    /// Extend the review timeline to today with a zero count
    pub pad_review_timeline_to_today: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            category_grouping: CategoryGrouping::Canonical,
            include_unknown_severity: true,
            pad_review_timeline_to_today: true,
        }
    }
}

// ============================================================================
// VIEW MODEL
// ============================================================================

/// Render-ready data for the active view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub view: ActiveView,
    pub days: u32,
    pub filter_text: String,
    pub totals: SnapshotTotals,
    pub panels: ViewPanels,
}

/// Header counts, independent of the active view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTotals {
    pub threats: usize,
    pub remediations: usize,
    pub blocked_ips: usize,
    /// Remediations left after the filter
    pub filtered_remediations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewPanels {
    Incident(IncidentPanels),
    Performance(PerformancePanels),
    Health(HealthPanels),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentPanels {
    pub severity_automation: SeverityAutomation,
    pub success_rate: SuccessRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePanels {
    pub grouping: CategoryGrouping,
    pub finding_volume: LabeledCounts,
    pub response_time: LatencyAverages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthPanels {
    pub severity_distribution: SeverityDistribution,
    pub review_timeline: ReviewTimeline,
    pub daily_volume: DailyVolume,
}
