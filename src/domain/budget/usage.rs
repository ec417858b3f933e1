use serde::{Deserialize, Serialize};

use super::MonthPeriod;
use crate::domain::trip::Trip;

/// Sum of trip costs for trips that start inside `period`
///
/// Only `start_time` decides membership, so a trip that crosses midnight at
/// the end of the month counts entirely toward the month it started in.
/// Trips without a cost contribute 0.
pub fn monthly_usage<'a, I>(trips: I, period: MonthPeriod) -> f64
where
    I: IntoIterator<Item = &'a Trip>,
{
    total(
        trips
            .into_iter()
            .filter(|trip| period.contains(trip.start_time))
            .map(Trip::cost_or_zero),
    )
}

/// `Iterator::sum` over an empty `f64` iterator yields -0.0
fn total(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, value| acc + value)
}

/// Aggregated figures for one user and month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub month: u32,
    pub year: i32,
    pub total_cost: f64,
    pub trip_count: usize,
    pub distance_km: f64,
    pub fuel_used_liters: f64,
}

impl UsageSummary {
    pub fn from_trips<'a, I>(trips: I, period: MonthPeriod) -> Self
    where
        I: IntoIterator<Item = &'a Trip>,
    {
        let in_period: Vec<&Trip> = trips
            .into_iter()
            .filter(|trip| period.contains(trip.start_time))
            .collect();

        Self {
            month: period.month(),
            year: period.year(),
            total_cost: monthly_usage(in_period.iter().copied(), period),
            trip_count: in_period.len(),
            distance_km: total(in_period.iter().map(|t| t.distance_km)),
            fuel_used_liters: total(in_period.iter().map(|t| t.fuel_used_liters)),
        }
    }

    /// Average cost per kilometre, 0 when nothing was driven
    pub fn cost_per_km(&self) -> f64 {
        if self.distance_km <= 0.0 {
            return 0.0;
        }

        self.total_cost / self.distance_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::{GeoPoint, TripId};
    use crate::domain::user::UserId;
    use crate::domain::vehicle::VehicleId;
    use chrono::{DateTime, TimeZone, Utc};

    fn trip_at(start: DateTime<Utc>, cost: Option<f64>) -> Trip {
        let trip = Trip::new(
            TripId::generate(),
            UserId::new("user-1").unwrap(),
            VehicleId::new("veh-1"),
            start,
            GeoPoint::new(52.52, 13.40),
        );
        match cost {
            Some(cost) => trip.with_cost(cost),
            None => trip,
        }
    }

    fn march_2024() -> MonthPeriod {
        MonthPeriod::new(2, 2024).unwrap()
    }

    #[test]
    fn test_empty_trip_set_is_zero() {
        let trips: Vec<Trip> = Vec::new();
        let usage = monthly_usage(&trips, march_2024());

        assert_eq!(usage, 0.0);
        assert!(!usage.is_sign_negative());
    }

    #[test]
    fn test_empty_summary_serializes_positive_zeros() {
        let trips: Vec<Trip> = Vec::new();
        let summary = UsageSummary::from_trips(&trips, march_2024());

        assert!(!summary.total_cost.is_sign_negative());
        assert!(!summary.distance_km.is_sign_negative());
        assert!(!summary.fuel_used_liters.is_sign_negative());

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"total_cost\":0.0"));
        assert!(!json.contains("-0.0"));
    }

    #[test]
    fn test_sums_costs_in_month() {
        let trips = vec![
            trip_at(Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap(), Some(40.0)),
            trip_at(Utc.with_ymd_and_hms(2024, 3, 20, 17, 0, 0).unwrap(), Some(35.0)),
            trip_at(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(), Some(99.0)),
            trip_at(Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap(), Some(12.0)),
        ];

        assert_eq!(monthly_usage(&trips, march_2024()), 75.0);
    }

    #[test]
    fn test_missing_cost_counts_as_zero() {
        let trips = vec![
            trip_at(Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap(), None),
            trip_at(Utc.with_ymd_and_hms(2024, 3, 6, 8, 0, 0).unwrap(), Some(10.5)),
        ];

        assert_eq!(monthly_usage(&trips, march_2024()), 10.5);
    }

    #[test]
    fn test_trip_crossing_month_end_counts_toward_start_month() {
        let start = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 4, 1, 0, 45, 0).unwrap();
        let trip = trip_at(start, Some(20.0)).with_end(end, GeoPoint::new(52.50, 13.30));
        let trips = vec![trip];

        assert_eq!(monthly_usage(&trips, march_2024()), 20.0);
        assert_eq!(monthly_usage(&trips, MonthPeriod::new(3, 2024).unwrap()), 0.0);
    }

    #[test]
    fn test_usage_is_deterministic() {
        let trips = vec![
            trip_at(Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap(), Some(1.1)),
            trip_at(Utc.with_ymd_and_hms(2024, 3, 3, 8, 0, 0).unwrap(), Some(2.2)),
        ];

        let first = monthly_usage(&trips, march_2024());
        let second = monthly_usage(&trips, march_2024());
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_aggregates_period_only() {
        let trips = vec![
            trip_at(Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap(), Some(40.0))
                .with_distance_km(100.0)
                .with_fuel_used_liters(8.0),
            trip_at(Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).unwrap(), Some(10.0))
                .with_distance_km(25.0)
                .with_fuel_used_liters(2.0),
            trip_at(Utc.with_ymd_and_hms(2024, 5, 9, 8, 0, 0).unwrap(), Some(70.0))
                .with_distance_km(300.0),
        ];

        let summary = UsageSummary::from_trips(&trips, march_2024());

        assert_eq!(summary.month, 2);
        assert_eq!(summary.year, 2024);
        assert_eq!(summary.total_cost, 50.0);
        assert_eq!(summary.trip_count, 2);
        assert_eq!(summary.distance_km, 125.0);
        assert_eq!(summary.fuel_used_liters, 10.0);
        assert_eq!(summary.cost_per_km(), 0.4);
    }

    #[test]
    fn test_cost_per_km_without_distance() {
        let trips: Vec<Trip> = Vec::new();
        let summary = UsageSummary::from_trips(&trips, march_2024());
        assert_eq!(summary.cost_per_km(), 0.0);
    }
}
