//! Trip entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::telemetry::TelemetrySample;
use crate::domain::user::UserId;
use crate::domain::vehicle::VehicleId;

/// Trip identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TripId(String);

impl TripId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("trip-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TripId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TripId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for TripId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TripId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TripValidationError {
    #[error("{field} must be a finite, non-negative number")]
    NegativeValue { field: &'static str },

    #[error("{which} location is outside valid coordinates")]
    InvalidLocation { which: &'static str },

    #[error("Trip cannot end before it starts")]
    EndBeforeStart,

    #[error("Trip has already been completed")]
    AlreadyCompleted,
}

/// A recorded trip
///
/// Written once when the trip is logged. The only later change is
/// completion, which sets `end_time` and `end_location`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    id: TripId,
    pub user_id: UserId,
    pub vehicle_id: VehicleId,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub start_location: GeoPoint,
    #[serde(default)]
    pub end_location: Option<GeoPoint>,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub fuel_used_liters: f64,
    #[serde(default)]
    pub average_speed_kmh: f64,
    #[serde(default)]
    pub max_speed_kmh: f64,
    #[serde(default)]
    pub idle_time_minutes: f64,
    /// Money spent on the trip; documents written without it count as 0
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub efficiency_km_per_liter: f64,
    #[serde(default)]
    pub is_manual_entry: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telemetry: Vec<TelemetrySample>,
}

impl Trip {
    pub fn new(
        id: impl Into<TripId>,
        user_id: UserId,
        vehicle_id: VehicleId,
        start_time: DateTime<Utc>,
        start_location: GeoPoint,
    ) -> Self {
        Self {
            id: id.into(),
            user_id,
            vehicle_id,
            start_time,
            end_time: None,
            start_location,
            end_location: None,
            distance_km: 0.0,
            fuel_used_liters: 0.0,
            average_speed_kmh: 0.0,
            max_speed_kmh: 0.0,
            idle_time_minutes: 0.0,
            cost: None,
            efficiency_km_per_liter: 0.0,
            is_manual_entry: false,
            telemetry: Vec::new(),
        }
    }

    pub fn with_distance_km(mut self, distance: f64) -> Self {
        self.distance_km = distance;
        self.recompute_efficiency();
        self
    }

    pub fn with_fuel_used_liters(mut self, liters: f64) -> Self {
        self.fuel_used_liters = liters;
        self.recompute_efficiency();
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_speeds(mut self, average_kmh: f64, max_kmh: f64) -> Self {
        self.average_speed_kmh = average_kmh;
        self.max_speed_kmh = max_kmh;
        self
    }

    pub fn with_idle_time_minutes(mut self, minutes: f64) -> Self {
        self.idle_time_minutes = minutes;
        self
    }

    pub fn with_end(mut self, end_time: DateTime<Utc>, end_location: GeoPoint) -> Self {
        self.end_time = Some(end_time);
        self.end_location = Some(end_location);
        self
    }

    pub fn with_telemetry(mut self, samples: Vec<TelemetrySample>) -> Self {
        self.telemetry = samples;
        self
    }

    pub fn manual_entry(mut self) -> Self {
        self.is_manual_entry = true;
        self
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }

    /// Cost used by budget accounting
    pub fn cost_or_zero(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }

    pub fn is_in_progress(&self) -> bool {
        self.end_time.is_none()
    }

    /// Trip duration, `None` while in progress
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.end_time.map(|end| end - self.start_time)
    }

    /// km per liter, 0 when no fuel was used
    fn recompute_efficiency(&mut self) {
        self.efficiency_km_per_liter = if self.fuel_used_liters > 0.0 {
            self.distance_km / self.fuel_used_liters
        } else {
            0.0
        };
    }

    /// Check the invariants a trip must satisfy before it is written
    pub fn validate(&self) -> Result<(), TripValidationError> {
        let non_negative = [
            ("distance_km", self.distance_km),
            ("fuel_used_liters", self.fuel_used_liters),
            ("average_speed_kmh", self.average_speed_kmh),
            ("max_speed_kmh", self.max_speed_kmh),
            ("idle_time_minutes", self.idle_time_minutes),
            ("cost", self.cost_or_zero()),
        ];

        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TripValidationError::NegativeValue { field });
            }
        }

        if !self.start_location.is_valid() {
            return Err(TripValidationError::InvalidLocation { which: "Start" });
        }

        if let Some(end_location) = &self.end_location {
            if !end_location.is_valid() {
                return Err(TripValidationError::InvalidLocation { which: "End" });
            }
        }

        if let Some(end_time) = self.end_time {
            if end_time < self.start_time {
                return Err(TripValidationError::EndBeforeStart);
            }
        }

        Ok(())
    }

    /// Mark an in-progress trip as finished
    pub fn complete(
        &mut self,
        end_time: DateTime<Utc>,
        end_location: GeoPoint,
    ) -> Result<(), TripValidationError> {
        if !self.is_in_progress() {
            return Err(TripValidationError::AlreadyCompleted);
        }

        if end_time < self.start_time {
            return Err(TripValidationError::EndBeforeStart);
        }

        if !end_location.is_valid() {
            return Err(TripValidationError::InvalidLocation { which: "End" });
        }

        self.end_time = Some(end_time);
        self.end_location = Some(end_location);
        Ok(())
    }
}

impl StorageEntity for Trip {
    type Key = TripId;
    const COLLECTION: &'static str = "trips";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn trip() -> Trip {
        Trip::new(
            "trip-1",
            UserId::new("u1").unwrap(),
            VehicleId::from("veh-1"),
            Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap(),
            GeoPoint::new(-23.55, -46.63),
        )
    }

    #[test]
    fn test_efficiency_is_derived() {
        let trip = trip().with_distance_km(120.0).with_fuel_used_liters(10.0);
        assert!((trip.efficiency_km_per_liter - 12.0).abs() < f64::EPSILON);

        let no_fuel = self::trip().with_distance_km(5.0);
        assert_eq!(no_fuel.efficiency_km_per_liter, 0.0);
    }

    #[test]
    fn test_missing_cost_counts_as_zero() {
        assert_eq!(trip().cost_or_zero(), 0.0);
        assert_eq!(trip().with_cost(42.5).cost_or_zero(), 42.5);
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let json = r#"{
            "id": "trip-9",
            "user_id": "u1",
            "vehicle_id": "veh-1",
            "start_time": "2024-03-10T08:00:00Z",
            "start_location": {"latitude": 1.0, "longitude": 2.0}
        }"#;

        let trip: Trip = serde_json::from_str(json).unwrap();
        assert!(trip.cost.is_none());
        assert!(trip.is_in_progress());
        assert!(trip.telemetry.is_empty());
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        let trip = trip().with_cost(-1.0);
        assert_eq!(
            trip.validate(),
            Err(TripValidationError::NegativeValue { field: "cost" })
        );

        let trip = self::trip().with_distance_km(-3.0);
        assert_eq!(
            trip.validate(),
            Err(TripValidationError::NegativeValue {
                field: "distance_km"
            })
        );
    }

    #[test]
    fn test_validate_rejects_end_before_start() {
        let start = trip().start_time;
        let trip = trip().with_end(start - chrono::Duration::minutes(5), GeoPoint::new(0.0, 0.0));
        assert_eq!(trip.validate(), Err(TripValidationError::EndBeforeStart));
    }

    #[test]
    fn test_validate_rejects_bad_coordinates() {
        let mut trip = trip();
        trip.start_location = GeoPoint::new(95.0, 0.0);
        assert_eq!(
            trip.validate(),
            Err(TripValidationError::InvalidLocation { which: "Start" })
        );
    }

    #[test]
    fn test_complete_trip() {
        let mut trip = trip();
        let end = trip.start_time + chrono::Duration::minutes(45);

        trip.complete(end, GeoPoint::new(-23.50, -46.60)).unwrap();

        assert!(!trip.is_in_progress());
        assert_eq!(trip.duration(), Some(chrono::Duration::minutes(45)));
        assert_eq!(
            trip.complete(end, GeoPoint::new(0.0, 0.0)),
            Err(TripValidationError::AlreadyCompleted)
        );
    }
}
