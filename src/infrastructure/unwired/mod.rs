//! Collaborators with an interface but no backing implementation
//!
//! Each one answers every call with `DomainError::NotImplemented`, so callers
//! can tell "not wired up" apart from an empty result.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::fuel_log::{FuelLogRepository, FuelPurchase};
use crate::domain::station::{FuelStation, FuelStationLocator};
use crate::domain::telemetry::{TelemetryConnector, TelemetrySample};
use crate::domain::trip::GeoPoint;
use crate::domain::user::UserId;
use crate::domain::vehicle::VehicleId;
use crate::domain::DomainError;

fn unwired<T>(feature: &str) -> Result<T, DomainError> {
    debug!(feature, "Call to unwired collaborator");
    Err(DomainError::not_implemented(feature))
}

#[derive(Debug, Default)]
pub struct UnwiredFuelLog;

#[async_trait]
impl FuelLogRepository for UnwiredFuelLog {
    async fn record(&self, _purchase: FuelPurchase) -> Result<FuelPurchase, DomainError> {
        unwired("fuel log persistence")
    }

    async fn list_by_user(&self, _user_id: &UserId) -> Result<Vec<FuelPurchase>, DomainError> {
        unwired("fuel log persistence")
    }
}

#[derive(Debug, Default)]
pub struct UnwiredStationLocator;

#[async_trait]
impl FuelStationLocator for UnwiredStationLocator {
    async fn nearby(
        &self,
        _location: GeoPoint,
        _radius_km: f64,
    ) -> Result<Vec<FuelStation>, DomainError> {
        unwired("fuel station lookup")
    }
}

#[derive(Debug, Default)]
pub struct UnwiredTelemetry;

#[async_trait]
impl TelemetryConnector for UnwiredTelemetry {
    async fn connect(&self, _vehicle_id: &VehicleId) -> Result<(), DomainError> {
        unwired("vehicle telemetry")
    }

    async fn read_sample(&self, _vehicle_id: &VehicleId) -> Result<TelemetrySample, DomainError> {
        unwired("vehicle telemetry")
    }

    async fn disconnect(&self, _vehicle_id: &VehicleId) -> Result<(), DomainError> {
        unwired("vehicle telemetry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_fuel_log_is_not_implemented() {
        let log = UnwiredFuelLog;
        let user_id = UserId::new("user-1").unwrap();

        let purchase = FuelPurchase {
            id: "fp-1".to_string(),
            user_id: user_id.clone(),
            vehicle_id: VehicleId::new("veh-1"),
            liters: 40.0,
            price_per_liter: 1.8,
            total_cost: 72.0,
            odometer_km: None,
            station_id: None,
            purchased_at: Utc::now(),
        };

        assert!(log.record(purchase).await.unwrap_err().is_not_implemented());
        assert!(log.list_by_user(&user_id).await.unwrap_err().is_not_implemented());
    }

    #[tokio::test]
    async fn test_station_lookup_is_not_implemented() {
        let locator = UnwiredStationLocator;
        let err = locator
            .nearby(GeoPoint::new(51.5, -0.12), 5.0)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Not implemented: fuel station lookup");
    }

    #[tokio::test]
    async fn test_telemetry_is_not_implemented() {
        let telemetry = UnwiredTelemetry;
        let vehicle_id = VehicleId::new("veh-1");

        assert!(telemetry.connect(&vehicle_id).await.unwrap_err().is_not_implemented());
        assert!(telemetry.read_sample(&vehicle_id).await.unwrap_err().is_not_implemented());
        assert!(telemetry.disconnect(&vehicle_id).await.unwrap_err().is_not_implemented());
    }
}
