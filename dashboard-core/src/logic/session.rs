//! Dashboard Session
//!
//! Explicit, host-owned dashboard state: current parameters, the snapshot
//! and view model last applied, and the sequence number of the refresh
//! that produced them. Replaces ambient chart/tab/timer globals.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;
use super::view::{ActiveView, DashboardParams, ViewModel};

/// Partial parameter update from the host UI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamsUpdate {
    pub days: Option<u32>,
    pub filter_text: Option<String>,
    pub active_view: Option<ActiveView>,
    pub auto_refresh_enabled: Option<bool>,
    pub refresh_interval_secs: Option<u64>,
}

/// What an update actually changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamsChange {
    /// days, filter text or active view differ: the view must be rebuilt
    pub data_changed: bool,
    /// auto-refresh toggle or interval differ: the timer must be restarted
    pub schedule_changed: bool,
}

impl ParamsChange {
    pub fn is_empty(&self) -> bool {
        !self.data_changed && !self.schedule_changed
    }
}

/// Serializable view of the session for the host
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub params: DashboardParams,
    pub view_model: Option<Arc<ViewModel>>,
    pub applied_sequence: u64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// The view model was built for other params than the current ones
    /// (a refresh after a change is still pending or has failed)
    pub view_pending: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    params: DashboardParams,
    snapshot: Option<Arc<Snapshot>>,
    view_model: Option<Arc<ViewModel>>,
    applied_sequence: u64,
    last_refreshed_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl DashboardSession {
    pub fn new(params: DashboardParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn params(&self) -> &DashboardParams {
        &self.params
    }

    pub fn active_view(&self) -> ActiveView {
        self.params.active_view
    }

    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.clone()
    }

    pub fn view_model(&self) -> Option<Arc<ViewModel>> {
        self.view_model.clone()
    }

    pub fn applied_sequence(&self) -> u64 {
        self.applied_sequence
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Explicit view selection; returns true when the view changed
    pub fn select_view(&mut self, view: ActiveView) -> bool {
        self.update(ParamsUpdate {
            active_view: Some(view),
            ..Default::default()
        })
        .data_changed
    }

    /// Apply a partial update and report what changed
    pub fn update(&mut self, update: ParamsUpdate) -> ParamsChange {
        let mut change = ParamsChange::default();
        let params = &mut self.params;

        if let Some(days) = update.days.filter(|d| *d != params.days) {
            params.days = days;
            change.data_changed = true;
        }
        if let Some(text) = update.filter_text.filter(|t| *t != params.filter_text) {
            params.filter_text = text;
            change.data_changed = true;
        }
        if let Some(view) = update.active_view.filter(|v| *v != params.active_view) {
            log::debug!("View transition: {} -> {}", params.active_view, view);
            params.active_view = view;
            change.data_changed = true;
        }
        if let Some(enabled) = update.auto_refresh_enabled.filter(|e| *e != params.auto_refresh_enabled) {
            params.auto_refresh_enabled = enabled;
            change.schedule_changed = true;
        }
        if let Some(secs) = update
            .refresh_interval_secs
            .filter(|s| *s > 0 && *s != params.refresh_interval_secs)
        {
            params.refresh_interval_secs = secs;
            change.schedule_changed = true;
        }

        change
    }

    /// Results of refresh `sequence` would be older than what is shown
    pub fn is_stale(&self, sequence: u64) -> bool {
        sequence <= self.applied_sequence
    }

    /// Atomically replace snapshot and view model; false when stale
    pub fn apply(
        &mut self,
        sequence: u64,
        snapshot: Arc<Snapshot>,
        view_model: ViewModel,
        at: DateTime<Utc>,
    ) -> bool {
        if self.is_stale(sequence) {
            return false;
        }

        self.applied_sequence = sequence;
        self.snapshot = Some(snapshot);
        self.view_model = Some(Arc::new(view_model));
        self.last_refreshed_at = Some(at);
        self.last_error = None;
        true
    }

    /// Record a failed retrieval; the displayed view model is untouched
    pub fn record_failure(&mut self, error: String) {
        self.last_error = Some(error);
    }

    /// True when the shown view model does not reflect the current params
    pub fn is_view_pending(&self) -> bool {
        self.view_model.as_deref().is_some_and(|model| {
            model.view != self.params.active_view
                || model.days != self.params.days
                || model.filter_text != self.params.filter_text
        })
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            view_pending: self.is_view_pending(),
            params: self.params.clone(),
            view_model: self.view_model.clone(),
            applied_sequence: self.applied_sequence,
            last_refreshed_at: self.last_refreshed_at,
            last_error: self.last_error.clone(),
        }
    }
}
