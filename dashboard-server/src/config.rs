//! Configuration module

use std::env;

use remediation_core::constants;
use remediation_core::logic::categorize::CategoryGrouping;
use remediation_core::logic::refresh::SourceConfig;
use remediation_core::logic::view::{DashboardParams, PipelineOptions};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Snapshot endpoint
    pub snapshot_url: String,

    /// Snapshot document on disk; takes precedence over the endpoint
    pub snapshot_file: Option<String>,

    /// Snapshot request timeout in seconds
    pub snapshot_timeout_secs: u64,

    /// Initial trailing day window
    pub default_days: u32,

    /// Initial auto-refresh interval in seconds
    pub refresh_interval_secs: u64,

    pub auto_refresh_enabled: bool,

    /// Performance view grouping (`canonical` or `raw`)
    pub category_grouping: CategoryGrouping,

    pub include_unknown_severity: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            snapshot_url: constants::get_snapshot_url(),
            snapshot_file: constants::get_snapshot_file(),
            snapshot_timeout_secs: constants::get_snapshot_timeout(),
            default_days: constants::get_default_days(),
            refresh_interval_secs: constants::get_refresh_interval(),
            auto_refresh_enabled: constants::is_auto_refresh_enabled(),

            category_grouping: env::var("CATEGORY_GROUPING")
                .ok()
                .and_then(|g| CategoryGrouping::parse(&g))
                .unwrap_or_default(),

            include_unknown_severity: constants::is_unknown_severity_included(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Parameters the session starts with
    pub fn initial_params(&self) -> DashboardParams {
        DashboardParams {
            days: self.default_days,
            filter_text: String::new(),
            active_view: Default::default(),
            auto_refresh_enabled: self.auto_refresh_enabled,
            refresh_interval_secs: self.refresh_interval_secs,
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            category_grouping: self.category_grouping,
            include_unknown_severity: self.include_unknown_severity,
            ..Default::default()
        }
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            url: self.snapshot_url.clone(),
            timeout_seconds: self.snapshot_timeout_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            snapshot_url: constants::DEFAULT_SNAPSHOT_URL.to_string(),
            snapshot_file: None,
            snapshot_timeout_secs: constants::DEFAULT_SNAPSHOT_TIMEOUT,
            default_days: constants::DEFAULT_DAYS,
            refresh_interval_secs: constants::DEFAULT_REFRESH_INTERVAL,
            auto_refresh_enabled: false,
            category_grouping: CategoryGrouping::default(),
            include_unknown_severity: true,
            environment: "development".to_string(),
        }
    }
}
