//! View Module
//!
//! Three-state view machine (incident, performance, health) and the
//! builder that turns a snapshot plus parameters into one view model.

pub mod types;
pub mod builder;

pub use types::{
    ActiveView, DashboardParams, HealthPanels, IncidentPanels, PerformancePanels,
    PipelineOptions, SnapshotTotals, ViewModel, ViewPanels,
};
pub use builder::build_view_model;
