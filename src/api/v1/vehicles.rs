//! Vehicle endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{AddVehicleBody, ApiError, Json};
use crate::domain::vehicle::Vehicle;

/// GET /v1/users/{user_id}/vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
    debug!(user_id = %user_id, "Listing vehicles");

    let vehicles = state.vehicle_service.list(&user_id).await?;
    Ok(Json(vehicles))
}

/// POST /v1/users/{user_id}/vehicles
pub async fn add_vehicle(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<AddVehicleBody>,
) -> Result<(StatusCode, Json<Vehicle>), ApiError> {
    body.validate()?;

    let vehicle = state
        .vehicle_service
        .add(&user_id, body.into_request())
        .await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// GET /v1/users/{user_id}/vehicles/active
pub async fn get_active_vehicle(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vehicle>, ApiError> {
    debug!(user_id = %user_id, "Getting active vehicle");

    state
        .vehicle_service
        .active(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("User '{}' has no active vehicle", user_id)))
}

/// POST /v1/users/{user_id}/vehicles/{vehicle_id}/activate
pub async fn activate_vehicle(
    State(state): State<AppState>,
    Path((user_id, vehicle_id)): Path<(String, String)>,
) -> Result<Json<Vehicle>, ApiError> {
    debug!(user_id = %user_id, vehicle_id = %vehicle_id, "Activating vehicle");

    let vehicle = state
        .vehicle_service
        .set_active(&user_id, &vehicle_id)
        .await?;
    Ok(Json(vehicle))
}

/// DELETE /v1/users/{user_id}/vehicles/{vehicle_id}
pub async fn remove_vehicle(
    State(state): State<AppState>,
    Path((user_id, vehicle_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = %user_id, vehicle_id = %vehicle_id, "Removing vehicle");

    state.vehicle_service.remove(&user_id, &vehicle_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
