//! Prometheus metrics

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::config::MetricsConfig;
use crate::domain::budget::BudgetStatus;

/// Handle used to render the scrape endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Install the global recorder; `None` when disabled or already installed
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("fuel_tracker_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!(path = %config.path, "Prometheus metrics initialized");

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize Prometheus metrics");
            None
        }
    }
}

pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// `path` should be the matched route template so label cardinality stays bounded
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Count budget evaluations by outcome
pub fn record_budget_evaluation(status: &BudgetStatus) {
    let outcome = match status.alert() {
        Some(alert) => alert_kind(&alert),
        None => "ok",
    };
    let role = if status.is_driver { "driver" } else { "citizen" };

    counter!("budget_evaluations_total", "outcome" => outcome, "role" => role).increment(1);
    histogram!("budget_usage_percentage", "role" => role).record(status.usage_percentage);
}

fn alert_kind(alert: &crate::domain::budget::BudgetAlert) -> &'static str {
    use crate::domain::budget::BudgetAlert;

    match alert {
        BudgetAlert::Exceeded { .. } => "exceeded",
        BudgetAlert::NearlyExceeded { .. } => "nearly_exceeded",
        BudgetAlert::MonitorSpending { .. } => "monitor_spending",
    }
}
