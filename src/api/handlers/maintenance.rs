use axum::{extract::Path, Json};

use crate::api::models::maintenance::{mock_schedule, MaintenanceSchedule};

/// GET /api/maintenance/{plant_id}
pub async fn get_maintenance(Path(plant_id): Path<String>) -> Json<MaintenanceSchedule> {
    tracing::debug!(plant_id = %plant_id, "Serving maintenance schedule");
    Json(mock_schedule())
}
