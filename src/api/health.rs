//! Health check endpoints for Kubernetes probes

use std::future::Future;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::warn;

use crate::api::types::Json;
use crate::domain::trip::TripId;
use crate::domain::vehicle::VehicleId;
use crate::domain::{parse_user_id, DomainError};

use super::state::AppState;

/// Detailed health response with component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Simple health check - returns 200 if the service is running
/// Used for basic liveness probes
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check with dependency verification
/// Probes each collection so a lost database connection shows up here
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let collections = &state.collections;

    let checks = vec![
        check_store("users", async {
            let probe = parse_user_id(PROBE_ID)?;
            collections.users.exists(&probe).await
        })
        .await,
        check_store(
            "vehicles",
            collections.vehicles.exists(&VehicleId::new(PROBE_ID)),
        )
        .await,
        check_store("trips", collections.trips.exists(&TripId::new(PROBE_ID))).await,
    ];

    let overall_status = overall_status(&checks);
    let latency = start.elapsed().as_millis() as u64;
    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(latency),
    };

    let status_code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK, // Still accept requests
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Liveness check - simple check to verify the service is running
/// Used for Kubernetes liveness probes to detect crashes
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

const PROBE_ID: &str = "readiness-probe";

/// Every store down is unhealthy, some down is degraded
fn overall_status(checks: &[HealthCheck]) -> HealthStatus {
    let failing = checks
        .iter()
        .filter(|check| check.status != HealthStatus::Healthy)
        .count();

    match failing {
        0 => HealthStatus::Healthy,
        n if n == checks.len() => HealthStatus::Unhealthy,
        _ => HealthStatus::Degraded,
    }
}

async fn check_store<F>(name: &str, probe: F) -> HealthCheck
where
    F: Future<Output = Result<bool, DomainError>>,
{
    let start = Instant::now();

    match probe.await {
        Ok(_) => HealthCheck {
            name: name.to_string(),
            status: HealthStatus::Healthy,
            message: None,
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            warn!(store = name, error = %e, "Readiness probe failed");
            HealthCheck {
                name: name.to_string(),
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
                latency_ms: Some(start.elapsed().as_millis() as u64),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "1.0.0".to_string(),
            checks: None,
            latency_ms: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(!json.contains("checks"));
    }

    #[test]
    fn test_health_response_with_checks() {
        let response = HealthResponse {
            status: HealthStatus::Degraded,
            version: "1.0.0".to_string(),
            checks: Some(vec![
                HealthCheck {
                    name: "users".to_string(),
                    status: HealthStatus::Healthy,
                    message: None,
                    latency_ms: Some(5),
                },
                HealthCheck {
                    name: "trips".to_string(),
                    status: HealthStatus::Unhealthy,
                    message: Some("Connection refused".to_string()),
                    latency_ms: Some(100),
                },
            ]),
            latency_ms: Some(105),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"degraded\""));
        assert!(json.contains("\"users\""));
        assert!(json.contains("\"trips\""));
        assert!(json.contains("\"Connection refused\""));
    }

    fn check(status: HealthStatus) -> HealthCheck {
        HealthCheck {
            name: "store".to_string(),
            status,
            message: None,
            latency_ms: None,
        }
    }

    #[test]
    fn test_overall_status() {
        use HealthStatus::*;

        assert!(overall_status(&[check(Healthy), check(Healthy)]) == Healthy);
        assert!(overall_status(&[check(Healthy), check(Unhealthy)]) == Degraded);
        assert!(overall_status(&[check(Unhealthy), check(Unhealthy)]) == Unhealthy);
    }

    #[tokio::test]
    async fn test_check_store_reports_failure_message() {
        let failed = check_store("trips", async {
            Err::<bool, _>(DomainError::storage("connection refused"))
        })
        .await;
        assert!(failed.status == HealthStatus::Unhealthy);
        assert!(failed.message.unwrap().contains("connection refused"));

        let ok = check_store("trips", async { Ok::<_, DomainError>(false) }).await;
        assert!(ok.status == HealthStatus::Healthy);
    }
}
