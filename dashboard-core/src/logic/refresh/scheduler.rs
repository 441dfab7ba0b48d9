//! Refresh Scheduler
//!
//! Timer abstraction decoupled from any UI toolkit. Triggers are delivered
//! over a channel; the coordinator owns the receiving end.

use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Why a refresh was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "trigger", rename_all = "snake_case")]
pub enum RefreshTrigger {
    Startup,
    /// Timer tick, stamped with the generation of the timer that fired
    Timer { generation: u64 },
    ParameterChange,
    ViewSwitch,
    Manual,
}

pub trait Scheduler: Send + Sync {
    /// (Re)start periodic triggers; replaces any running timer
    fn start(&self, interval: Duration);

    /// Cancel periodic triggers
    fn stop(&self);

    /// Request one refresh immediately
    fn trigger_now(&self, trigger: RefreshTrigger);

    fn is_running(&self) -> bool;

    /// Changes on every start/stop; older timer ticks are void
    fn generation(&self) -> u64;
}

#[derive(Default)]
struct TimerState {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

/// tokio-backed scheduler
pub struct IntervalScheduler {
    tx: mpsc::UnboundedSender<RefreshTrigger>,
    state: Mutex<TimerState>,
}

impl IntervalScheduler {
    /// Scheduler plus the receiver its triggers arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RefreshTrigger>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            state: Mutex::new(TimerState::default()),
        };
        (scheduler, rx)
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&self, interval: Duration) {
        let interval = interval.max(Duration::from_millis(1));
        let mut state = self.state.lock();

        if let Some(task) = state.task.take() {
            task.abort();
        }
        state.generation += 1;

        let generation = state.generation;
        let first_tick = Instant::now() + interval;
        let tx = self.tx.clone();

        state.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if tx.send(RefreshTrigger::Timer { generation }).is_err() {
                    log::debug!("Refresh receiver dropped, timer {} exiting", generation);
                    break;
                }
            }
        }));

        log::info!("Auto-refresh started: every {:?} (timer {})", interval, generation);
    }

    fn stop(&self) {
        let mut state = self.state.lock();
        state.generation += 1;

        if let Some(task) = state.task.take() {
            task.abort();
            log::info!("Auto-refresh stopped");
        }
    }

    fn trigger_now(&self, trigger: RefreshTrigger) {
        if self.tx.send(trigger).is_err() {
            log::warn!("Refresh receiver dropped, trigger {:?} lost", trigger);
        }
    }

    fn is_running(&self) -> bool {
        self.state.lock().task.is_some()
    }

    fn generation(&self) -> u64 {
        self.state.lock().generation
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.state.get_mut().task.take() {
            task.abort();
        }
    }
}
