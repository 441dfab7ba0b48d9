//! Dashboard handlers

use axum::{extract::{Path, State}, http::StatusCode, Json};

use remediation_core::logic::refresh::RefreshTrigger;
use remediation_core::logic::session::SessionStatus;

use crate::models::{parse_view, RefreshAccepted, UpdateParamsRequest, UpdateParamsResponse};
use crate::{AppResult, AppState};

/// Current parameters and the last applied view model
pub async fn get(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.coordinator.status())
}

/// Update days/filter/view/auto-refresh settings
pub async fn update_params(
    State(state): State<AppState>,
    Json(req): Json<UpdateParamsRequest>,
) -> AppResult<Json<UpdateParamsResponse>> {
    let update = req.into_update()?;
    let change = state.coordinator.update_params(update);

    tracing::debug!(
        data_changed = change.data_changed,
        schedule_changed = change.schedule_changed,
        "Dashboard parameters updated"
    );

    Ok(Json(UpdateParamsResponse::new(state.coordinator.params(), change)))
}

/// Switch the active view
pub async fn select_view(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> AppResult<Json<UpdateParamsResponse>> {
    let view = parse_view(&view)?;
    let changed = state.coordinator.select_view(view);

    Ok(Json(UpdateParamsResponse {
        params: state.coordinator.params(),
        refresh_requested: changed,
        schedule_changed: false,
    }))
}

/// Request an immediate refresh
pub async fn refresh(State(state): State<AppState>) -> (StatusCode, Json<RefreshAccepted>) {
    state.scheduler.trigger_now(RefreshTrigger::Manual);

    (
        StatusCode::ACCEPTED,
        Json(RefreshAccepted {
            accepted: true,
            trigger: RefreshTrigger::Manual,
        }),
    )
}
