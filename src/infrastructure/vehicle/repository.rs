//! Storage-backed vehicle repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::user::UserId;
use crate::domain::vehicle::{Vehicle, VehicleId, VehicleRepository};
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StorageVehicleRepository {
    storage: Arc<dyn Storage<Vehicle>>,
}

impl StorageVehicleRepository {
    pub fn new(storage: Arc<dyn Storage<Vehicle>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl VehicleRepository for StorageVehicleRepository {
    async fn get(&self, id: &VehicleId) -> Result<Option<Vehicle>, DomainError> {
        self.storage.get(id).await
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Vehicle>, DomainError> {
        let mut vehicles = self.storage.find_by("user_id", user_id.as_str()).await?;
        vehicles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(vehicles)
    }

    async fn create(&self, vehicle: Vehicle) -> Result<Vehicle, DomainError> {
        self.storage.create(vehicle).await
    }

    async fn update(&self, vehicle: Vehicle) -> Result<Vehicle, DomainError> {
        self.storage.update(vehicle).await
    }

    async fn delete(&self, id: &VehicleId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }
}
