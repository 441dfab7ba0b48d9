//! Remediation Core
//!
//! Aggregation pipeline behind the remediation dashboard: turns one
//! snapshot of threats, remediation actions and blocked IPs plus the
//! user's parameters into the view model of the active view, and keeps
//! that view model fresh.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────────────────┐
//! │ Snapshot     │──▶│ Record Filter │──▶│ Aggregators              │
//! │ Source       │   └───────────────┘   │ (categorize + normalize) │
//! └──────▲───────┘                       └────────────┬─────────────┘
//!        │                                            ▼
//! ┌──────┴───────────────┐               ┌──────────────────────────┐
//! │ Refresh Coordinator  │──────────────▶│ View Model Builder       │
//! │ (scheduler, seq no.) │               └────────────┬─────────────┘
//! └──────────────────────┘                            ▼
//!                                          DashboardSession.view_model
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{ExportError, SourceError};
