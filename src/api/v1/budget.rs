//! Budget endpoint handlers

use axum::extract::{Path, Query, State};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{AlertView, AlertsResponse, ApiError, Json, PeriodQuery, UsageResponse};
use crate::domain::budget::BudgetStatus;
use crate::infrastructure::metrics::record_budget_evaluation;

/// GET /v1/users/{user_id}/usage?month=&year=
pub async fn get_usage(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<UsageResponse>, ApiError> {
    query.validate()?;
    debug!(user_id = %user_id, month = ?query.month, year = ?query.year, "Computing usage");

    let summary = state
        .budget_service
        .usage_summary(&user_id, query.month, query.year)
        .await?;

    Ok(Json(UsageResponse::new(user_id, summary)))
}

/// GET /v1/users/{user_id}/budget-status
pub async fn get_budget_status(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<BudgetStatus>, ApiError> {
    debug!(user_id = %user_id, "Computing budget status");

    let status = state.budget_service.budget_status(&user_id).await?;
    record_budget_evaluation(&status);

    Ok(Json(status))
}

/// GET /v1/users/{user_id}/budget-alerts
pub async fn get_budget_alerts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AlertsResponse>, ApiError> {
    debug!(user_id = %user_id, "Evaluating budget alerts");

    let status = state.budget_service.budget_status(&user_id).await?;
    record_budget_evaluation(&status);

    Ok(Json(AlertsResponse {
        user_id,
        alerts: status.alerts().into_iter().map(AlertView::from).collect(),
    }))
}
