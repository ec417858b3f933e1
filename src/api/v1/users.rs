//! Profile endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{AmountBody, ApiError, CreateUserBody, Json};
use crate::domain::user::User;

/// POST /v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    body.validate()?;

    let user = state.user_service.create(body.into_request()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /v1/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %user_id, "Getting profile");

    let user = state.user_service.get(&user_id).await?;
    Ok(Json(user))
}

/// PUT /v1/users/{user_id}/personal-budget
pub async fn set_personal_budget(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<AmountBody>,
) -> Result<Json<User>, ApiError> {
    body.validate()?;
    debug!(user_id = %user_id, amount = body.amount, "Setting personal budget");

    let user = state
        .user_service
        .set_personal_budget(&user_id, body.amount)
        .await?;
    Ok(Json(user))
}

/// PUT /v1/users/{user_id}/fuel-limit
pub async fn set_monthly_fuel_limit(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<AmountBody>,
) -> Result<Json<User>, ApiError> {
    body.validate()?;
    debug!(user_id = %user_id, amount = body.amount, "Setting monthly fuel limit");

    let user = state
        .user_service
        .set_monthly_fuel_limit(&user_id, body.amount)
        .await?;
    Ok(Json(user))
}
