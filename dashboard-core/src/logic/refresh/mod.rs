//! Refresh Module
//!
//! Scheduling policy around the pure pipeline: a timer abstraction, the
//! snapshot fetch capability, and the coordinator tying them to the session.

pub mod scheduler;
pub mod source;
pub mod coordinator;

pub use scheduler::{IntervalScheduler, RefreshTrigger, Scheduler};
pub use source::{FetchFuture, FileSnapshotSource, HttpSnapshotSource, SnapshotSource, SourceConfig};
pub use coordinator::{RefreshCoordinator, RefreshOutcome};
