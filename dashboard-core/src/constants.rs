//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every value can be overridden through the environment.

/// Default snapshot endpoint
///
/// For development: http://localhost:9000/api/snapshot
pub const DEFAULT_SNAPSHOT_URL: &str = "http://localhost:9000/api/snapshot";

/// Default snapshot request timeout (seconds)
pub const DEFAULT_SNAPSHOT_TIMEOUT: u64 = 30;

/// Default trailing day window
pub const DEFAULT_DAYS: u32 = 7;

/// Default auto-refresh interval (seconds)
pub const DEFAULT_REFRESH_INTERVAL: u64 = 60;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get snapshot endpoint from environment or use default
pub fn get_snapshot_url() -> String {
    std::env::var("SNAPSHOT_URL")
        .unwrap_or_else(|_| DEFAULT_SNAPSHOT_URL.to_string())
}

/// Snapshot file for offline mode, if configured
pub fn get_snapshot_file() -> Option<String> {
    std::env::var("SNAPSHOT_FILE")
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// Get snapshot timeout from environment or use default
pub fn get_snapshot_timeout() -> u64 {
    std::env::var("SNAPSHOT_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SNAPSHOT_TIMEOUT)
}

/// Get default day window from environment or use default
pub fn get_default_days() -> u32 {
    std::env::var("DEFAULT_DAYS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|d| *d > 0)
        .unwrap_or(DEFAULT_DAYS)
}

/// Get refresh interval from environment or use default
pub fn get_refresh_interval() -> u64 {
    std::env::var("REFRESH_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_REFRESH_INTERVAL)
}

/// Check if auto-refresh is enabled
pub fn is_auto_refresh_enabled() -> bool {
    std::env::var("AUTO_REFRESH_ENABLED")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}

/// Check if the `Unknown` severity bucket is reported
pub fn is_unknown_severity_included() -> bool {
    std::env::var("INCLUDE_UNKNOWN_SEVERITY")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}
