//! User profile repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Profile reads and writes against the record store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns the profile or `None` when absent
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Stores a new profile, Conflict if the id is taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replaces an existing profile
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
