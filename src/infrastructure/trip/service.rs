//! Trip recording service

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::trip::{GeoPoint, Trip, TripId, TripRepository, TripValidationError};
use crate::domain::user::{parse_user_id, UserId, UserRepository};
use crate::domain::vehicle::{Vehicle, VehicleId, VehicleRepository};
use crate::domain::DomainError;

/// Request for logging a trip
#[derive(Debug, Clone)]
pub struct RecordTripRequest {
    /// Defaults to the user's active vehicle
    pub vehicle_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub start_location: GeoPoint,
    pub end_time: Option<DateTime<Utc>>,
    pub end_location: Option<GeoPoint>,
    pub distance_km: f64,
    pub fuel_used_liters: f64,
    pub average_speed_kmh: f64,
    pub max_speed_kmh: f64,
    pub idle_time_minutes: f64,
    pub cost: Option<f64>,
    pub is_manual_entry: bool,
}

impl RecordTripRequest {
    pub fn new(start_time: DateTime<Utc>, start_location: GeoPoint) -> Self {
        Self {
            vehicle_id: None,
            start_time,
            start_location,
            end_time: None,
            end_location: None,
            distance_km: 0.0,
            fuel_used_liters: 0.0,
            average_speed_kmh: 0.0,
            max_speed_kmh: 0.0,
            idle_time_minutes: 0.0,
            cost: None,
            is_manual_entry: false,
        }
    }

    pub fn with_vehicle(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle_id = Some(vehicle_id.into());
        self
    }

    pub fn with_end(mut self, end_time: DateTime<Utc>, end_location: GeoPoint) -> Self {
        self.end_time = Some(end_time);
        self.end_location = Some(end_location);
        self
    }

    pub fn with_distance_km(mut self, distance: f64) -> Self {
        self.distance_km = distance;
        self
    }

    pub fn with_fuel_used_liters(mut self, liters: f64) -> Self {
        self.fuel_used_liters = liters;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn manual_entry(mut self) -> Self {
        self.is_manual_entry = true;
        self
    }

    fn into_trip(self, user_id: UserId, vehicle_id: VehicleId) -> Result<Trip, DomainError> {
        let mut trip = Trip::new(
            TripId::generate(),
            user_id,
            vehicle_id,
            self.start_time,
            self.start_location,
        )
        .with_distance_km(self.distance_km)
        .with_fuel_used_liters(self.fuel_used_liters)
        .with_speeds(self.average_speed_kmh, self.max_speed_kmh)
        .with_idle_time_minutes(self.idle_time_minutes);

        match (self.end_time, self.end_location) {
            (Some(end_time), Some(end_location)) => trip = trip.with_end(end_time, end_location),
            (None, None) => {}
            _ => {
                return Err(DomainError::validation(
                    "End time and end location must be given together",
                ))
            }
        }

        if let Some(cost) = self.cost {
            trip = trip.with_cost(cost);
        }

        if self.is_manual_entry {
            trip = trip.manual_entry();
        }

        Ok(trip)
    }
}

fn trip_error(error: TripValidationError) -> DomainError {
    match &error {
        TripValidationError::AlreadyCompleted => DomainError::conflict(error.to_string()),
        _ => DomainError::validation(error.to_string()),
    }
}

#[async_trait]
pub trait TripServiceTrait: Send + Sync {
    async fn record(&self, user_id: &str, request: RecordTripRequest) -> Result<Trip, DomainError>;

    /// Finish an in-progress trip; Conflict if it was already completed
    async fn complete(
        &self,
        trip_id: &str,
        end_time: DateTime<Utc>,
        end_location: GeoPoint,
    ) -> Result<Trip, DomainError>;

    async fn get(&self, trip_id: &str) -> Result<Trip, DomainError>;

    /// Every trip of the user, newest first
    async fn list(&self, user_id: &str) -> Result<Vec<Trip>, DomainError>;
}

pub struct TripService<U, V, T>
where
    U: UserRepository,
    V: VehicleRepository,
    T: TripRepository,
{
    users: Arc<U>,
    vehicles: Arc<V>,
    trips: Arc<T>,
}

impl<U, V, T> Debug for TripService<U, V, T>
where
    U: UserRepository,
    V: VehicleRepository,
    T: TripRepository,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripService").finish_non_exhaustive()
    }
}

impl<U, V, T> TripService<U, V, T>
where
    U: UserRepository,
    V: VehicleRepository,
    T: TripRepository,
{
    pub fn new(users: Arc<U>, vehicles: Arc<V>, trips: Arc<T>) -> Self {
        Self {
            users,
            vehicles,
            trips,
        }
    }

    async fn resolve_vehicle(
        &self,
        user_id: &UserId,
        requested: Option<&str>,
    ) -> Result<Vehicle, DomainError> {
        match requested {
            Some(raw) => {
                let vehicle_id = VehicleId::new(raw);
                match self.vehicles.get(&vehicle_id).await? {
                    Some(vehicle) if vehicle.is_owned_by(user_id) => Ok(vehicle),
                    _ => Err(DomainError::not_found(format!(
                        "Vehicle '{}' not found for user '{}'",
                        vehicle_id, user_id
                    ))),
                }
            }
            None => self
                .vehicles
                .list_by_user(user_id)
                .await?
                .into_iter()
                .find(|v| v.is_active)
                .ok_or_else(|| {
                    DomainError::validation(format!(
                        "User '{}' has no active vehicle; pass a vehicle id",
                        user_id
                    ))
                }),
        }
    }

    async fn fetch(&self, trip_id: &str) -> Result<Trip, DomainError> {
        let trip_id = TripId::new(trip_id);

        self.trips
            .get(&trip_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Trip '{}' not found", trip_id)))
    }
}

#[async_trait]
impl<U, V, T> TripServiceTrait for TripService<U, V, T>
where
    U: UserRepository + 'static,
    V: VehicleRepository + 'static,
    T: TripRepository + 'static,
{
    async fn record(&self, user_id: &str, request: RecordTripRequest) -> Result<Trip, DomainError> {
        let user_id = parse_user_id(user_id)?;

        if self.users.get(&user_id).await?.is_none() {
            return Err(DomainError::not_found(format!("User '{}' not found", user_id)));
        }

        let vehicle = self
            .resolve_vehicle(&user_id, request.vehicle_id.as_deref())
            .await?;

        let trip = request.into_trip(user_id, vehicle.id().clone())?;
        trip.validate().map_err(trip_error)?;

        let trip = self.trips.create(trip).await?;
        info!(
            user_id = %trip.user_id,
            trip_id = %trip.id(),
            vehicle_id = %trip.vehicle_id,
            cost = trip.cost_or_zero(),
            "Recorded trip"
        );
        Ok(trip)
    }

    async fn complete(
        &self,
        trip_id: &str,
        end_time: DateTime<Utc>,
        end_location: GeoPoint,
    ) -> Result<Trip, DomainError> {
        let mut trip = self.fetch(trip_id).await?;

        trip.complete(end_time, end_location).map_err(trip_error)?;

        let trip = self.trips.update(trip).await?;
        info!(trip_id = %trip.id(), "Completed trip");
        Ok(trip)
    }

    async fn get(&self, trip_id: &str) -> Result<Trip, DomainError> {
        self.fetch(trip_id).await
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Trip>, DomainError> {
        let user_id = parse_user_id(user_id)?;

        let mut trips = self.trips.list_by_user(&user_id).await?;
        trips.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(trips)
    }
}
