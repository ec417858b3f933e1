//! Vehicle management service

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::user::{parse_user_id, UserId, UserRepository};
use crate::domain::vehicle::{FuelType, Vehicle, VehicleId, VehicleRepository};
use crate::domain::DomainError;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// Request for registering a vehicle
#[derive(Debug, Clone)]
pub struct AddVehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub fuel_type: FuelType,
    pub license_plate: String,
    /// Make this the active vehicle even if another one is active
    pub activate: bool,
}

impl AddVehicleRequest {
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        fuel_type: FuelType,
        license_plate: impl Into<String>,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            fuel_type,
            license_plate: license_plate.into(),
            activate: false,
        }
    }

    pub fn activated(mut self) -> Self {
        self.activate = true;
        self
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.make.trim().is_empty() || self.model.trim().is_empty() {
            return Err(DomainError::validation("Vehicle make and model are required"));
        }

        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(DomainError::validation(format!(
                "Vehicle year must be between {} and {}",
                MIN_YEAR, MAX_YEAR
            )));
        }

        if self.license_plate.trim().is_empty() {
            return Err(DomainError::validation("License plate is required"));
        }

        Ok(())
    }
}

#[async_trait]
pub trait VehicleServiceTrait: Send + Sync {
    /// The user's first vehicle is always made active
    async fn add(&self, user_id: &str, request: AddVehicleRequest) -> Result<Vehicle, DomainError>;

    /// Oldest first
    async fn list(&self, user_id: &str) -> Result<Vec<Vehicle>, DomainError>;

    async fn active(&self, user_id: &str) -> Result<Option<Vehicle>, DomainError>;

    /// Activate one vehicle and deactivate every other vehicle of the user
    async fn set_active(&self, user_id: &str, vehicle_id: &str) -> Result<Vehicle, DomainError>;

    async fn remove(&self, user_id: &str, vehicle_id: &str) -> Result<(), DomainError>;
}

pub struct VehicleService<U: UserRepository, V: VehicleRepository> {
    users: Arc<U>,
    vehicles: Arc<V>,
}

impl<U: UserRepository, V: VehicleRepository> Debug for VehicleService<U, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VehicleService").finish_non_exhaustive()
    }
}

impl<U: UserRepository, V: VehicleRepository> VehicleService<U, V> {
    pub fn new(users: Arc<U>, vehicles: Arc<V>) -> Self {
        Self { users, vehicles }
    }

    async fn require_user(&self, raw: &str) -> Result<UserId, DomainError> {
        let user_id = parse_user_id(raw)?;

        if self.users.get(&user_id).await?.is_none() {
            return Err(DomainError::not_found(format!("User '{}' not found", user_id)));
        }

        Ok(user_id)
    }

    /// Looks up a vehicle and hides vehicles owned by someone else
    async fn owned_vehicle(
        &self,
        user_id: &UserId,
        vehicle_id: &str,
    ) -> Result<Vehicle, DomainError> {
        let vehicle_id = VehicleId::new(vehicle_id);

        match self.vehicles.get(&vehicle_id).await? {
            Some(vehicle) if vehicle.is_owned_by(user_id) => Ok(vehicle),
            _ => Err(DomainError::not_found(format!(
                "Vehicle '{}' not found for user '{}'",
                vehicle_id, user_id
            ))),
        }
    }

    /// Clears the active flag on every vehicle except `keep`
    async fn deactivate_others(
        &self,
        vehicles: Vec<Vehicle>,
        keep: &VehicleId,
    ) -> Result<(), DomainError> {
        for mut vehicle in vehicles {
            if vehicle.is_active && vehicle.id() != keep {
                vehicle.is_active = false;
                debug!(vehicle_id = %vehicle.id(), "Deactivating vehicle");
                self.vehicles.update(vehicle).await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl<U, V> VehicleServiceTrait for VehicleService<U, V>
where
    U: UserRepository + 'static,
    V: VehicleRepository + 'static,
{
    async fn add(&self, user_id: &str, request: AddVehicleRequest) -> Result<Vehicle, DomainError> {
        request.validate()?;
        let user_id = self.require_user(user_id).await?;

        let existing = self.vehicles.list_by_user(&user_id).await?;
        let activate = request.activate || existing.is_empty();

        let mut vehicle = Vehicle::new(
            VehicleId::generate(),
            user_id.clone(),
            request.make,
            request.model,
            request.year,
            request.fuel_type,
            request.license_plate,
        );
        vehicle.is_active = activate;

        if activate {
            self.deactivate_others(existing, vehicle.id()).await?;
        }

        let vehicle = self.vehicles.create(vehicle).await?;
        info!(
            user_id = %user_id,
            vehicle_id = %vehicle.id(),
            active = vehicle.is_active,
            "Added vehicle"
        );
        Ok(vehicle)
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Vehicle>, DomainError> {
        let user_id = parse_user_id(user_id)?;
        self.vehicles.list_by_user(&user_id).await
    }

    async fn active(&self, user_id: &str) -> Result<Option<Vehicle>, DomainError> {
        let user_id = parse_user_id(user_id)?;
        let vehicles = self.vehicles.list_by_user(&user_id).await?;
        Ok(vehicles.into_iter().find(|v| v.is_active))
    }

    async fn set_active(&self, user_id: &str, vehicle_id: &str) -> Result<Vehicle, DomainError> {
        let user_id = parse_user_id(user_id)?;
        let mut target = self.owned_vehicle(&user_id, vehicle_id).await?;

        let vehicles = self.vehicles.list_by_user(&user_id).await?;
        self.deactivate_others(vehicles, target.id()).await?;

        if target.is_active {
            return Ok(target);
        }

        target.is_active = true;
        let vehicle = self.vehicles.update(target).await?;
        info!(user_id = %user_id, vehicle_id = %vehicle.id(), "Activated vehicle");
        Ok(vehicle)
    }

    async fn remove(&self, user_id: &str, vehicle_id: &str) -> Result<(), DomainError> {
        let user_id = parse_user_id(user_id)?;
        let vehicle = self.owned_vehicle(&user_id, vehicle_id).await?;

        self.vehicles.delete(vehicle.id()).await?;
        info!(user_id = %user_id, vehicle_id = %vehicle.id(), "Removed vehicle");

        // Keep one vehicle active while the user still has any
        if vehicle.is_active {
            let remaining = self.vehicles.list_by_user(&user_id).await?;
            if let Some(mut oldest) = remaining.into_iter().next() {
                oldest.is_active = true;
                debug!(vehicle_id = %oldest.id(), "Promoting vehicle to active");
                self.vehicles.update(oldest).await?;
            }
        }

        Ok(())
    }
}
