use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::{
    api::models::plants::MessageResponse,
    error::Result,
    repositories::{Plant, PlantCreate, PlantUpdate},
};

/// GET /api/plants
pub async fn get_all_plants(State(state): State<AppState>) -> Result<Json<Vec<Plant>>> {
    let plants = state.plants.get_all().await?;
    Ok(Json(plants))
}

/// GET /api/plants/{plant_id}
pub async fn get_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
) -> Result<Json<Plant>> {
    let plant = state.plants.get_by_id(&plant_id).await?;
    Ok(Json(plant))
}

/// POST /api/plants
pub async fn create_plant(
    State(state): State<AppState>,
    Json(create): Json<PlantCreate>,
) -> Result<(StatusCode, Json<Plant>)> {
    let plant = state.plants.create(&create).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

/// PUT /api/plants/{plant_id}
/// Merges the provided fields into the stored plant
pub async fn update_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
    Json(update): Json<PlantUpdate>,
) -> Result<Json<Plant>> {
    let plant = state.plants.update(&plant_id, &update).await?;
    Ok(Json(plant))
}

/// DELETE /api/plants/{plant_id}
pub async fn delete_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.plants.delete(&plant_id).await?;
    Ok(Json(MessageResponse {
        message: "Plant deleted".to_string(),
    }))
}
