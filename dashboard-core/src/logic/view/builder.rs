//! View Model Builder
//!
//! Runs exactly the aggregators of the active view over the filtered
//! remediation records. Pure: the only clock input is the `today`
//! argument used to pad the review timeline.

use chrono::NaiveDate;

use super::types::{
    ActiveView, DashboardParams, HealthPanels, IncidentPanels, PerformancePanels,
    PipelineOptions, SnapshotTotals, ViewModel, ViewPanels,
};
use crate::logic::aggregate;
use crate::logic::filter::RecordFilter;
use crate::logic::snapshot::{RemediationRecord, Snapshot};

/// Build the view model for `params.active_view`
pub fn build_view_model(
    snapshot: &Snapshot,
    params: &DashboardParams,
    options: &PipelineOptions,
    today: Option<NaiveDate>,
) -> ViewModel {
    let filter = RecordFilter::new(&params.filter_text);
    let filtered = filter.apply(&snapshot.remediations);

    let totals = SnapshotTotals {
        threats: snapshot.threats.len(),
        remediations: snapshot.remediations.len(),
        blocked_ips: snapshot.blocked_ips.len(),
        filtered_remediations: filtered.len(),
    };

    let panels = match params.active_view {
        ActiveView::Incident => ViewPanels::Incident(incident_panels(&filtered, options)),
        ActiveView::Performance => ViewPanels::Performance(performance_panels(&filtered, options)),
        ActiveView::Health => ViewPanels::Health(health_panels(&filtered, options, today)),
    };

    ViewModel {
        view: params.active_view,
        days: params.days,
        filter_text: params.filter_text.clone(),
        totals,
        panels,
    }
}

fn incident_panels(records: &[&RemediationRecord], options: &PipelineOptions) -> IncidentPanels {
    IncidentPanels {
        severity_automation: aggregate::severity_automation(
            records.iter().copied(),
            options.include_unknown_severity,
        ),
        success_rate: aggregate::success_rate(records.iter().copied()),
    }
}

fn performance_panels(records: &[&RemediationRecord], options: &PipelineOptions) -> PerformancePanels {
    PerformancePanels {
        grouping: options.category_grouping,
        finding_volume: aggregate::category_volume(records.iter().copied(), options.category_grouping),
        response_time: aggregate::latency_by_group(records.iter().copied(), options.category_grouping),
    }
}

fn health_panels(
    records: &[&RemediationRecord],
    options: &PipelineOptions,
    today: Option<NaiveDate>,
) -> HealthPanels {
    let today = today.filter(|_| options.pad_review_timeline_to_today);

    HealthPanels {
        severity_distribution: aggregate::severity_distribution(
            records.iter().copied(),
            options.include_unknown_severity,
        ),
        review_timeline: aggregate::review_timeline(records.iter().copied(), today),
        daily_volume: aggregate::daily_volume(records.iter().copied()),
    }
}

// ============================================================================
// TESTS
// ============================================================================
