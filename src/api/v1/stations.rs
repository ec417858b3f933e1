//! Fuel station lookup handler

use axum::extract::{Query, State};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, StationQuery};
use crate::domain::station::FuelStation;
use crate::domain::trip::GeoPoint;

/// GET /v1/fuel-stations?latitude=&longitude=&radius_km=
pub async fn nearby_stations(
    State(state): State<AppState>,
    Query(query): Query<StationQuery>,
) -> Result<Json<Vec<FuelStation>>, ApiError> {
    query.validate()?;
    debug!(
        latitude = query.latitude,
        longitude = query.longitude,
        radius_km = query.radius_km,
        "Looking up fuel stations"
    );

    let stations = state
        .station_locator
        .nearby(GeoPoint::new(query.latitude, query.longitude), query.radius_km)
        .await?;
    Ok(Json(stations))
}
