//! Storage-backed user repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
}

impl StorageUserRepository {
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.storage.create(user).await
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.storage.update(user).await
    }
}
