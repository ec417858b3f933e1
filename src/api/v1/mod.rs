//! Versioned tracking API

pub mod budget;
pub mod stations;
pub mod trips;
pub mod users;
pub mod vehicles;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users/{user_id}", get(users::get_user))
        .route(
            "/users/{user_id}/personal-budget",
            put(users::set_personal_budget),
        )
        .route(
            "/users/{user_id}/fuel-limit",
            put(users::set_monthly_fuel_limit),
        )
        .route("/users/{user_id}/usage", get(budget::get_usage))
        .route("/users/{user_id}/budget-status", get(budget::get_budget_status))
        .route("/users/{user_id}/budget-alerts", get(budget::get_budget_alerts))
        .route(
            "/users/{user_id}/vehicles",
            get(vehicles::list_vehicles).post(vehicles::add_vehicle),
        )
        .route(
            "/users/{user_id}/vehicles/active",
            get(vehicles::get_active_vehicle),
        )
        .route(
            "/users/{user_id}/vehicles/{vehicle_id}",
            axum::routing::delete(vehicles::remove_vehicle),
        )
        .route(
            "/users/{user_id}/vehicles/{vehicle_id}/activate",
            post(vehicles::activate_vehicle),
        )
        .route(
            "/users/{user_id}/trips",
            get(trips::list_trips).post(trips::record_trip),
        )
        .route("/trips/{trip_id}", get(trips::get_trip))
        .route("/trips/{trip_id}/complete", post(trips::complete_trip))
        .route("/fuel-stations", get(stations::nearby_stations))
}
