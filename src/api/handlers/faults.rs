use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::{
    api::models::faults::{mock_findings, FaultFinding},
    error::{AppError, Result},
    repositories::Severity,
};

const UPLOAD_FIELD: &str = "csvFile";

/// POST /api/fault-detection
/// Accepts a CSV upload and reports canned findings; raises a warning alert.
pub async fn detect_faults(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<FaultFinding>>> {
    let mut uploaded_bytes = 0usize;

    while let Some(mut field) = multipart.next_field().await.map_err(upload_error)? {
        let is_upload = field.name() == Some(UPLOAD_FIELD);
        // Drain chunk by chunk; only the size is needed
        while let Some(chunk) = field.chunk().await.map_err(upload_error)? {
            if is_upload {
                uploaded_bytes += chunk.len();
            }
        }
    }

    tracing::info!(uploaded_bytes, "Running fault detection on upload");

    state
        .alerts
        .raise("Fault detected in uploaded data", Severity::Warning)
        .await?;

    Ok(Json(mock_findings()))
}

fn upload_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("upload exceeds limit: {}", e.body_text()))
    } else {
        AppError::InvalidArgument(format!("invalid upload: {}", e.body_text()))
    }
}

/// GET /api/alerts
pub async fn get_alerts(
    State(state): State<AppState>,
) -> Result<Json<Vec<crate::repositories::Alert>>> {
    let alerts = state.alerts.get_all().await?;
    Ok(Json(alerts))
}
