//! Router tests against an in-memory snapshot source

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;

use remediation_core::logic::refresh::{FetchFuture, RefreshTrigger, SnapshotSource};
use remediation_core::logic::snapshot::Snapshot;

use crate::config::Config;
use crate::{create_router, AppState};

struct StaticSource(Snapshot);

impl SnapshotSource for StaticSource {
    fn fetch(&self, _days: u32) -> FetchFuture<'_> {
        let snapshot = self.0.clone();
        Box::pin(async move { Ok(snapshot) })
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

fn sample_snapshot() -> Snapshot {
    let document = json!({
        "threats": [{"type": "Recon:EC2/Portscan", "severity": 5}],
        "remediations": [
            {"finding_type": "UnauthorizedAccess:EC2/SSHBruteForce", "severity": "HIGH",
             "action_status": "completed", "review_required": false, "latency_seconds": 12,
             "time_occurred": "2024-03-01T10:00:00Z"},
            {"finding_type": "Recon:EC2/Portscan", "severity": "low",
             "action_status": "failed", "review_required": true, "latency_seconds": 40,
             "time_occurred": "2024-03-02T11:00:00Z"}
        ],
        "blocked_ips": ["203.0.113.7"]
    });
    tokio_test::assert_ok!(Snapshot::from_json(&document.to_string()))
}

fn setup() -> (AppState, Router, mpsc::UnboundedReceiver<RefreshTrigger>) {
    let (state, triggers) = AppState::new(Config::default(), Arc::new(StaticSource(sample_snapshot())));
    let app = create_router(state.clone());
    (state, app, triggers)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    tokio_test::assert_ok!(serde_json::from_slice::<Value>(bytes))
}

#[tokio::test]
async fn test_health() {
    let (_state, app, _rx) = setup();
    let (status, body) = send(app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["snapshot_loaded"], false);
}

#[tokio::test]
async fn test_dashboard_before_first_refresh() {
    let (_state, app, _rx) = setup();
    let (status, body) = send(app, "GET", "/api/v1/dashboard", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert!(body["view_model"].is_null());
    assert_eq!(body["params"]["active_view"], "incident");
    assert_eq!(body["applied_sequence"], 0);
}

#[tokio::test]
async fn test_dashboard_after_refresh() {
    let (state, app, _rx) = setup();
    state.coordinator.refresh(RefreshTrigger::Startup).await;

    let (status, body) = send(app, "GET", "/api/v1/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);

    let model = &json_body(&body)["view_model"];
    assert_eq!(model["panels"]["kind"], "incident");
    assert_eq!(model["totals"]["remediations"], 2);
    assert_eq!(model["panels"]["success_rate"]["completed"], 1);
    assert_eq!(model["panels"]["success_rate"]["total"], 2);
}

#[tokio::test]
async fn test_update_params_requests_refresh() {
    let (_state, app, mut rx) = setup();
    let (status, body) = send(
        app,
        "PUT",
        "/api/v1/dashboard/params",
        Some(json!({"filter_text": "ssh", "days": 30})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["refresh_requested"], true);
    assert_eq!(body["params"]["days"], 30);
    assert_eq!(rx.recv().await, Some(RefreshTrigger::ParameterChange));
}

#[tokio::test]
async fn test_update_params_rejects_out_of_range() {
    let (_state, app, _rx) = setup();

    let (status, body) = send(app.clone(), "PUT", "/api/v1/dashboard/params", Some(json!({"days": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["status"], 400);

    let (status, _) = send(
        app.clone(),
        "PUT",
        "/api/v1/dashboard/params",
        Some(json!({"refresh_interval_secs": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app, "PUT", "/api/v1/dashboard/params", Some(json!({"active_view": "overview"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_select_view() {
    let (state, app, mut rx) = setup();

    let (status, body) = send(app.clone(), "PUT", "/api/v1/dashboard/view/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["params"]["active_view"], "health");
    assert_eq!(rx.recv().await, Some(RefreshTrigger::ViewSwitch));

    state.coordinator.refresh(RefreshTrigger::ViewSwitch).await;
    let (_, body) = send(app.clone(), "GET", "/api/v1/dashboard", None).await;
    assert_eq!(json_body(&body)["view_model"]["panels"]["kind"], "health");

    let (status, _) = send(app, "PUT", "/api/v1/dashboard/view/overview", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_manual_refresh_is_accepted() {
    let (_state, app, mut rx) = setup();
    let (status, body) = send(app, "POST", "/api/v1/dashboard/refresh", None).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json_body(&body)["trigger"], "manual");
    assert_eq!(rx.recv().await, Some(RefreshTrigger::Manual));
}

#[tokio::test]
async fn test_export_without_snapshot_is_not_found() {
    let (_state, app, _rx) = setup();
    let (status, body) = send(app, "GET", "/api/v1/export/threats", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"], "No threats records to export");
}

#[tokio::test]
async fn test_export_remediations_csv() {
    let (state, app, _rx) = setup();
    state.coordinator.refresh(RefreshTrigger::Startup).await;

    let request = Request::builder()
        .uri("/api/v1/export/remediations")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.contains("remediations_"));
    assert!(disposition.ends_with(".csv\""));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("\"finding_type\",\"severity\",\"action_status\""));
    assert_eq!(text.lines().count(), 3);
}

#[tokio::test]
async fn test_export_unknown_dataset() {
    let (state, app, _rx) = setup();
    state.coordinator.refresh(RefreshTrigger::Startup).await;

    let (status, _) = send(app, "GET", "/api/v1/export/alerts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_without_columns_is_not_found() {
    let snapshot = tokio_test::assert_ok!(Snapshot::from_json(r#"{"threats": [{}, {"type": "TorAccess"}]}"#));
    let (state, _triggers) = AppState::new(Config::default(), Arc::new(StaticSource(snapshot)));
    state.coordinator.refresh(RefreshTrigger::Startup).await;

    let (status, body) = send(create_router(state), "GET", "/api/v1/export/threats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["status"], 404);
}
