use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::AppState;
use crate::{
    api::models::monitoring::{DashboardChart, HistoryChart, HistoryParams},
    error::{AppError, Result},
    telemetry::{DaysWindow, Sample},
};

/// GET /api/live/{plant_id}
/// Generates a sample from the plant's capacity and records it in its history
pub async fn get_live_data(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
) -> Result<Json<Sample>> {
    let plant = state.plants.get_by_id(&plant_id).await?;

    let sample = state.samples.generate(plant.capacity)?;
    state.telemetry.append(&plant_id, sample.clone()).await?;

    Ok(Json(sample))
}

/// GET /api/history/{plant_id}?days=N
/// Daily energy totals for the last N days of retained history (default from config)
pub async fn get_history(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryChart>> {
    let days = match params.days.as_deref() {
        Some(raw) => parse_days(raw)?,
        None => state.default_days,
    };

    let aggregates = state
        .telemetry
        .query_daily(&plant_id, DaysWindow::Trailing(days))
        .await?;

    Ok(Json(HistoryChart::from(aggregates)))
}

/// GET /api/historical-data/{plant_id}?days=N
/// Same totals in the Chart.js shape the dashboard renders. A `days` value
/// that is not a positive integer (the dashboard can send `NaN`) falls back
/// to the configured default.
pub async fn get_historical_data(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<DashboardChart>> {
    let days = params
        .days
        .as_deref()
        .and_then(|raw| parse_days(raw).ok())
        .unwrap_or(state.default_days);

    let aggregates = state
        .telemetry
        .query_daily(&plant_id, DaysWindow::Trailing(days))
        .await?;

    Ok(Json(DashboardChart::from(aggregates)))
}

fn parse_days(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(AppError::InvalidArgument(format!(
            "days must be a positive integer, got {:?}",
            raw
        ))),
    }
}
