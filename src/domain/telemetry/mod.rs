//! On-board telemetry
//!
//! Samples can be attached to trips, but no hardware connector is wired up:
//! the only `TelemetryConnector` implementation reports `NotImplemented`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::vehicle::VehicleId;
use crate::domain::DomainError;

/// One reading from the vehicle's diagnostics port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub speed_kmh: f64,
    #[serde(default)]
    pub rpm: Option<u32>,
    #[serde(default)]
    pub fuel_rate_lph: Option<f64>,
}

/// Connection to a vehicle telemetry adapter
#[async_trait]
pub trait TelemetryConnector: Send + Sync {
    /// Open a session with the adapter paired to the vehicle
    async fn connect(&self, vehicle_id: &VehicleId) -> Result<(), DomainError>;

    /// Read the latest sample from the connected adapter
    async fn read_sample(&self, vehicle_id: &VehicleId) -> Result<TelemetrySample, DomainError>;

    async fn disconnect(&self, vehicle_id: &VehicleId) -> Result<(), DomainError>;
}
