//! Trip endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CompleteTripBody, Json, RecordTripBody};
use crate::domain::trip::Trip;

/// GET /v1/users/{user_id}/trips
pub async fn list_trips(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Trip>>, ApiError> {
    debug!(user_id = %user_id, "Listing trips");

    let trips = state.trip_service.list(&user_id).await?;
    Ok(Json(trips))
}

/// POST /v1/users/{user_id}/trips
pub async fn record_trip(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<RecordTripBody>,
) -> Result<(StatusCode, Json<Trip>), ApiError> {
    body.validate()?;

    let trip = state
        .trip_service
        .record(&user_id, body.into_request())
        .await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

/// GET /v1/trips/{trip_id}
pub async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>, ApiError> {
    debug!(trip_id = %trip_id, "Getting trip");

    let trip = state.trip_service.get(&trip_id).await?;
    Ok(Json(trip))
}

/// POST /v1/trips/{trip_id}/complete
pub async fn complete_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Json(body): Json<CompleteTripBody>,
) -> Result<Json<Trip>, ApiError> {
    let end_time = body.end_time.unwrap_or_else(Utc::now);
    debug!(trip_id = %trip_id, end_time = %end_time, "Completing trip");

    let trip = state
        .trip_service
        .complete(&trip_id, end_time, body.end_location)
        .await?;
    Ok(Json(trip))
}
