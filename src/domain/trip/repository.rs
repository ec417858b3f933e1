//! Trip repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Trip, TripId};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn get(&self, id: &TripId) -> Result<Option<Trip>, DomainError>;

    /// Every trip of the user. The store applies no date filtering.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Trip>, DomainError>;

    async fn create(&self, trip: Trip) -> Result<Trip, DomainError>;

    async fn update(&self, trip: Trip) -> Result<Trip, DomainError>;
}
