//! Vehicle repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Vehicle, VehicleId};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn get(&self, id: &VehicleId) -> Result<Option<Vehicle>, DomainError>;

    /// All vehicles owned by the user
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Vehicle>, DomainError>;

    async fn create(&self, vehicle: Vehicle) -> Result<Vehicle, DomainError>;

    async fn update(&self, vehicle: Vehicle) -> Result<Vehicle, DomainError>;

    async fn delete(&self, id: &VehicleId) -> Result<bool, DomainError>;
}
