use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use super::v1;
use crate::infrastructure::metrics::{create_metrics_router, PrometheusMetrics};

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Full router plus the Prometheus scrape endpoint when metrics are enabled
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>, metrics_path: &str) -> Router {
    let app = create_router_with_state(state);

    match metrics {
        Some(metrics) => app.merge(create_metrics_router(metrics, metrics_path)),
        None => app,
    }
}
