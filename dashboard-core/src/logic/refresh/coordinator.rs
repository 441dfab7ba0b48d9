//! Refresh Coordinator
//!
//! Decides when the pipeline re-runs and which result gets shown. Every
//! refresh takes a monotonic sequence number; a result is applied only if
//! no later-issued refresh has already been applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::mpsc;

use super::scheduler::{RefreshTrigger, Scheduler};
use super::source::SnapshotSource;
use crate::logic::session::{DashboardSession, ParamsChange, ParamsUpdate, SessionStatus};
use crate::logic::snapshot::Snapshot;
use crate::logic::view::{build_view_model, ActiveView, DashboardParams, PipelineOptions, ViewModel};

/// Result of one refresh attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    Applied { sequence: u64 },
    /// A later refresh was applied first; this result was discarded
    Stale { sequence: u64 },
    Failed { sequence: u64, error: String },
}

pub struct RefreshCoordinator {
    source: Arc<dyn SnapshotSource>,
    scheduler: Arc<dyn Scheduler>,
    session: RwLock<DashboardSession>,
    issued: AtomicU64,
    options: PipelineOptions,
}

impl RefreshCoordinator {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        scheduler: Arc<dyn Scheduler>,
        params: DashboardParams,
        options: PipelineOptions,
    ) -> Self {
        Self {
            source,
            scheduler,
            session: RwLock::new(DashboardSession::new(params)),
            issued: AtomicU64::new(0),
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn params(&self) -> DashboardParams {
        self.session.read().params().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.session.read().status()
    }

    pub fn view_model(&self) -> Option<Arc<ViewModel>> {
        self.session.read().view_model()
    }

    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.session.read().snapshot()
    }

    // ========================================================================
    // REFRESH
    // ========================================================================

    /// Fetch, build and (unless stale) apply one view model
    pub async fn refresh(&self, trigger: RefreshTrigger) -> RefreshOutcome {
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let params = self.params();

        log::debug!("Refresh #{} ({:?}): {} days, view {}", sequence, trigger, params.days, params.active_view);

        let snapshot = match self.source.fetch(params.days).await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                let error = e.to_string();
                let mut session = self.session.write();
                if !session.is_stale(sequence) {
                    session.record_failure(error.clone());
                }
                log::warn!("Refresh #{} failed: {}", sequence, error);
                if session.is_view_pending() {
                    log::warn!("Shown view model predates the current {} view parameters", params.active_view);
                }
                return RefreshOutcome::Failed { sequence, error };
            }
        };

        let today = Utc::now().date_naive();
        let view_model = build_view_model(&snapshot, &params, &self.options, Some(today));

        let applied = self.session.write().apply(sequence, snapshot, view_model, Utc::now());
        if applied {
            log::info!("Refresh #{} applied ({} view)", sequence, params.active_view);
            RefreshOutcome::Applied { sequence }
        } else {
            log::debug!("Refresh #{} discarded: newer result already shown", sequence);
            RefreshOutcome::Stale { sequence }
        }
    }

    // ========================================================================
    // PARAMETERS
    // ========================================================================

    /// Apply a partial parameter update from the host.
    ///
    /// Data changes request an immediate refresh; schedule changes restart
    /// or stop the timer while the session lock is held, so concurrent
    /// updates cannot leave a timer running after auto-refresh was disabled.
    pub fn update_params(&self, update: ParamsUpdate) -> ParamsChange {
        let mut session = self.session.write();
        let before = session.params().clone();
        let change = session.update(update);

        if change.schedule_changed {
            self.apply_schedule(session.params());
        }

        if change.data_changed {
            let after = session.params();
            let trigger = if before.days == after.days && before.filter_text == after.filter_text {
                RefreshTrigger::ViewSwitch
            } else {
                RefreshTrigger::ParameterChange
            };
            self.scheduler.trigger_now(trigger);
        }

        change
    }

    /// Explicit view selection; returns true when the view changed
    pub fn select_view(&self, view: ActiveView) -> bool {
        self.update_params(ParamsUpdate {
            active_view: Some(view),
            ..Default::default()
        })
        .data_changed
    }

    /// Align the scheduler with the current auto-refresh settings
    pub fn start_auto_refresh(&self) {
        let session = self.session.write();
        self.apply_schedule(session.params());
    }

    fn apply_schedule(&self, params: &DashboardParams) {
        if params.auto_refresh_enabled {
            self.scheduler.start(Duration::from_secs(params.refresh_interval_secs));
        } else {
            self.scheduler.stop();
        }
    }

    // ========================================================================
    // TRIGGER LOOP
    // ========================================================================

    /// Timer ticks from a stopped or restarted timer are void
    fn is_current(&self, trigger: &RefreshTrigger) -> bool {
        match trigger {
            RefreshTrigger::Timer { generation } => *generation == self.scheduler.generation(),
            _ => true,
        }
    }

    /// Consume triggers until every sender is gone
    pub async fn run(self: Arc<Self>, mut triggers: mpsc::UnboundedReceiver<RefreshTrigger>) {
        log::info!("Refresh loop started (source: {})", self.source.describe());

        while let Some(trigger) = triggers.recv().await {
            if !self.is_current(&trigger) {
                log::debug!("Dropping stale timer trigger {:?}", trigger);
                continue;
            }

            let coordinator = Arc::clone(&self);
            tokio::spawn(async move {
                coordinator.refresh(trigger).await;
            });
        }

        log::info!("Refresh loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::logic::refresh::scheduler::IntervalScheduler;
    use crate::logic::refresh::source::FetchFuture;
    use crate::logic::view::ViewPanels;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::collections::VecDeque;

    /// Replays scripted responses, each after its own delay
    struct ScriptedSource {
        script: Mutex<VecDeque<(Duration, Result<Snapshot, SourceError>)>>,
        requested_days: Mutex<Vec<u32>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<(Duration, Result<Snapshot, SourceError>)>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                requested_days: Mutex::new(Vec::new()),
            }
        }
    }

    impl SnapshotSource for ScriptedSource {
        fn fetch(&self, days: u32) -> FetchFuture<'_> {
            self.requested_days.lock().push(days);
            let next = self.script.lock().pop_front();
            Box::pin(async move {
                let (delay, result) = next.unwrap_or((Duration::ZERO, Ok(Snapshot::default())));
                tokio::time::sleep(delay).await;
                result
            })
        }

        fn describe(&self) -> String {
            "scripted".to_string()
        }
    }

    fn snapshot_with(count: usize) -> Snapshot {
        let remediations = (0..count)
            .map(|_| json!({"severity": "high", "action_status": "completed"}))
            .collect::<Vec<_>>();
        Snapshot::from_json(&json!({ "remediations": remediations }).to_string()).unwrap()
    }

    fn params() -> DashboardParams {
        DashboardParams {
            days: 7,
            filter_text: String::new(),
            active_view: ActiveView::Incident,
            auto_refresh_enabled: false,
            refresh_interval_secs: 60,
        }
    }

    fn coordinator(
        source: ScriptedSource,
    ) -> (Arc<RefreshCoordinator>, Arc<IntervalScheduler>, mpsc::UnboundedReceiver<RefreshTrigger>) {
        let (scheduler, rx) = IntervalScheduler::new();
        let scheduler = Arc::new(scheduler);
        let coordinator = RefreshCoordinator::new(
            Arc::new(source),
            scheduler.clone(),
            params(),
            PipelineOptions::default(),
        );
        (Arc::new(coordinator), scheduler, rx)
    }

    #[tokio::test]
    async fn test_refresh_applies_view_model() {
        let (coordinator, _, _rx) = coordinator(ScriptedSource::new(vec![(Duration::ZERO, Ok(snapshot_with(3)))]));

        let outcome = coordinator.refresh(RefreshTrigger::Startup).await;
        assert_eq!(outcome, RefreshOutcome::Applied { sequence: 1 });

        let model = coordinator.view_model().unwrap();
        assert_eq!(model.totals.remediations, 3);
        match &model.panels {
            ViewPanels::Incident(panels) => assert_eq!(panels.success_rate.completed, 3),
            other => panic!("unexpected panels: {:?}", other),
        }
        assert_eq!(coordinator.status().applied_sequence, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_order_response_is_discarded() {
        let source = ScriptedSource::new(vec![
            (Duration::from_millis(500), Ok(snapshot_with(1))),
            (Duration::from_millis(10), Ok(snapshot_with(2))),
        ]);
        let (coordinator, _, _rx) = coordinator(source);

        let (first, second) = tokio::join!(
            coordinator.refresh(RefreshTrigger::Manual),
            coordinator.refresh(RefreshTrigger::Manual),
        );

        assert_eq!(first, RefreshOutcome::Stale { sequence: 1 });
        assert_eq!(second, RefreshOutcome::Applied { sequence: 2 });
        assert_eq!(coordinator.view_model().unwrap().totals.remediations, 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_view_model() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, Ok(snapshot_with(4))),
            (Duration::ZERO, Err(SourceError::Server(503))),
        ]);
        let (coordinator, _, _rx) = coordinator(source);

        coordinator.refresh(RefreshTrigger::Startup).await;
        let outcome = coordinator.refresh(RefreshTrigger::Manual).await;

        assert!(matches!(outcome, RefreshOutcome::Failed { sequence: 2, .. }));
        let status = coordinator.status();
        assert_eq!(status.view_model.unwrap().totals.remediations, 4);
        assert_eq!(status.applied_sequence, 1);
        assert!(status.last_error.unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_failed_refresh_after_view_switch_is_flagged() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, Ok(snapshot_with(2))),
            (Duration::ZERO, Err(SourceError::Network("refused".into()))),
        ]);
        let (coordinator, _, _rx) = coordinator(source);

        coordinator.refresh(RefreshTrigger::Startup).await;
        assert!(!coordinator.status().view_pending);

        coordinator.select_view(ActiveView::Health);
        coordinator.refresh(RefreshTrigger::ViewSwitch).await;

        let status = coordinator.status();
        assert!(status.view_pending);
        assert_eq!(status.params.active_view, ActiveView::Health);
        assert_eq!(status.view_model.unwrap().view, ActiveView::Incident);
    }

    #[tokio::test]
    async fn test_refresh_uses_current_window() {
        let source = Arc::new(ScriptedSource::new(Vec::new()));
        let (scheduler, _rx) = IntervalScheduler::new();
        let coordinator = RefreshCoordinator::new(
            source.clone(),
            Arc::new(scheduler),
            params(),
            PipelineOptions::default(),
        );

        coordinator.update_params(ParamsUpdate {
            days: Some(30),
            ..Default::default()
        });
        coordinator.refresh(RefreshTrigger::ParameterChange).await;

        assert_eq!(*source.requested_days.lock(), vec![30]);
    }

    #[tokio::test]
    async fn test_data_change_triggers_refresh() {
        let (coordinator, _, mut rx) = coordinator(ScriptedSource::new(Vec::new()));

        coordinator.update_params(ParamsUpdate {
            filter_text: Some("ssh".to_string()),
            ..Default::default()
        });
        assert_eq!(rx.recv().await.unwrap(), RefreshTrigger::ParameterChange);

        assert!(coordinator.select_view(ActiveView::Health));
        assert_eq!(rx.recv().await.unwrap(), RefreshTrigger::ViewSwitch);

        assert!(!coordinator.select_view(ActiveView::Health));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_change_restarts_timer() {
        let (coordinator, scheduler, mut rx) = coordinator(ScriptedSource::new(Vec::new()));
        assert!(!scheduler.is_running());

        let change = coordinator.update_params(ParamsUpdate {
            auto_refresh_enabled: Some(true),
            refresh_interval_secs: Some(30),
            ..Default::default()
        });
        assert!(change.schedule_changed);
        assert!(!change.data_changed);
        assert!(scheduler.is_running());
        assert!(rx.try_recv().is_err());

        coordinator.update_params(ParamsUpdate {
            auto_refresh_enabled: Some(false),
            ..Default::default()
        });
        assert!(!scheduler.is_running());
    }

    #[tokio::test]
    async fn test_stale_timer_trigger_is_not_current() {
        let (coordinator, scheduler, _rx) = coordinator(ScriptedSource::new(Vec::new()));

        scheduler.start(Duration::from_secs(60));
        let tick = RefreshTrigger::Timer { generation: scheduler.generation() };
        assert!(coordinator.is_current(&tick));
        assert!(coordinator.is_current(&RefreshTrigger::Manual));

        scheduler.stop();
        assert!(!coordinator.is_current(&tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_applies_triggered_refresh() {
        let (coordinator, scheduler, rx) = coordinator(ScriptedSource::new(vec![(Duration::ZERO, Ok(snapshot_with(5)))]));

        let handle = tokio::spawn(Arc::clone(&coordinator).run(rx));
        scheduler.trigger_now(RefreshTrigger::Startup);

        for _ in 0..100 {
            if coordinator.view_model().is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(coordinator.view_model().unwrap().totals.remediations, 5);

        handle.abort();
    }
}
