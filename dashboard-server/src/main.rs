//! Remediation Dashboard Server
//!
//! HTTP host for the remediation dashboard: owns the dashboard session via
//! the refresh coordinator and serves view models and CSV exports to the
//! browser page that renders them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  REMEDIATION DASHBOARD                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │  API      │  │  Refresh         │  │  Interval       │  │
//! │  │  (Axum)   │─▶│  Coordinator     │◀─│  Scheduler      │  │
//! │  └───────────┘  └────────┬─────────┘  └─────────────────┘  │
//! │                          ▼                                  │
//! │                 ┌──────────────────┐                        │
//! │                 │ Snapshot Source  │ (HTTP or file)         │
//! │                 └──────────────────┘                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::sync::mpsc;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remediation_core::logic::refresh::{
    FileSnapshotSource, HttpSnapshotSource, IntervalScheduler, RefreshCoordinator, RefreshTrigger,
    Scheduler, SnapshotSource,
};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    init_tracing();
    let config = config::Config::from_env();

    tracing::info!("Remediation Dashboard starting ({})...", config.environment);

    let source = build_source(&config)?;
    if config.is_production() && config.snapshot_file.is_some() {
        tracing::warn!("Serving a static snapshot file in production");
    }
    tracing::info!("Snapshot source: {}", source.describe());

    // Build application state and start the refresh loop
    let (state, triggers) = AppState::new(config.clone(), source);
    tokio::spawn(Arc::clone(&state.coordinator).run(triggers));
    state.scheduler.trigger_now(RefreshTrigger::Startup);
    state.coordinator.start_auto_refresh();

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// `LOG_FORMAT=json` switches to structured output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "remediation_dashboard=debug,remediation_core=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").map(|f| f.eq_ignore_ascii_case("json")).unwrap_or(false) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// File source when `SNAPSHOT_FILE` is set, HTTP otherwise
fn build_source(config: &config::Config) -> anyhow::Result<Arc<dyn SnapshotSource>> {
    match &config.snapshot_file {
        Some(path) => Ok(Arc::new(FileSnapshotSource::new(path))),
        None => {
            let source = HttpSnapshotSource::new(config.source_config())
                .context("failed to build snapshot client")?;
            Ok(Arc::new(source))
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<RefreshCoordinator>,
    pub scheduler: Arc<dyn Scheduler>,
    pub config: config::Config,
}

impl AppState {
    /// State plus the trigger channel the refresh loop consumes
    pub fn new(
        config: config::Config,
        source: Arc<dyn SnapshotSource>,
    ) -> (Self, mpsc::UnboundedReceiver<RefreshTrigger>) {
        let (scheduler, triggers) = IntervalScheduler::new();
        let scheduler: Arc<dyn Scheduler> = Arc::new(scheduler);

        let coordinator = RefreshCoordinator::new(
            source,
            Arc::clone(&scheduler),
            config.initial_params(),
            config.pipeline_options(),
        );

        let state = Self {
            coordinator: Arc::new(coordinator),
            scheduler,
            config,
        };
        (state, triggers)
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Dashboard
        .route("/api/v1/dashboard", get(handlers::dashboard::get))
        .route("/api/v1/dashboard/params", put(handlers::dashboard::update_params))
        .route("/api/v1/dashboard/view/:view", put(handlers::dashboard::select_view))
        .route("/api/v1/dashboard/refresh", post(handlers::dashboard::refresh))

        // Export
        .route("/api/v1/export/:dataset", get(handlers::export::download));

    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
