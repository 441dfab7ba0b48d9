//! Export handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;

use remediation_core::logic::export::{export_dataset, ExportDataset};

use crate::{AppError, AppResult, AppState};

/// CSV download of one snapshot dataset
pub async fn download(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> AppResult<impl IntoResponse> {
    let dataset = ExportDataset::parse(&dataset)
        .ok_or_else(|| AppError::NotFound(format!("Unknown dataset: {}", dataset)))?;

    let snapshot = state
        .coordinator
        .snapshot()
        .ok_or_else(|| AppError::EmptyExport(format!("No {} records to export", dataset)))?;

    let export = export_dataset(&snapshot, dataset, Utc::now())?;
    tracing::info!("Serving {} ({} rows)", export.filename, export.rows);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.content,
    ))
}
