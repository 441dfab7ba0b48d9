//! Snapshot Sources
//!
//! The single suspending capability the coordinator depends on: fetch one
//! snapshot for a trailing day window.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use crate::constants;
use crate::error::SourceError;
use crate::logic::snapshot::Snapshot;

pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Snapshot, SourceError>> + Send + 'a>>;

pub trait SnapshotSource: Send + Sync {
    fn fetch(&self, days: u32) -> FetchFuture<'_>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

// ============================================================================
// HTTP SOURCE
// ============================================================================

/// Snapshot endpoint configuration
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: constants::get_snapshot_url(),
            timeout_seconds: constants::get_snapshot_timeout(),
        }
    }
}

/// `GET <url>?days=<n>` returning the snapshot document
pub struct HttpSnapshotSource {
    config: SourceConfig,
    http_client: reqwest::Client,
}

impl HttpSnapshotSource {
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    async fn fetch_snapshot(&self, days: u32) -> Result<Snapshot, SourceError> {
        let response = self.http_client
            .get(&self.config.url)
            .query(&[("days", days)])
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            log::warn!("Snapshot endpoint returned {}", status);
            return Err(SourceError::Server(status));
        }

        let body = response.text().await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Snapshot::from_json(&body)?)
    }
}

impl SnapshotSource for HttpSnapshotSource {
    fn fetch(&self, days: u32) -> FetchFuture<'_> {
        Box::pin(self.fetch_snapshot(days))
    }

    fn describe(&self) -> String {
        self.config.url.clone()
    }
}

// ============================================================================
// FILE SOURCE
// ============================================================================

/// Reads a snapshot document from disk (offline mode)
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn fetch(&self, days: u32) -> FetchFuture<'_> {
        Box::pin(async move {
            log::debug!("Reading snapshot from {} (window of {} days not applied)", self.path.display(), days);
            let text = tokio::fs::read_to_string(&self.path).await?;
            Ok(Snapshot::from_json(&text)?)
        })
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}
