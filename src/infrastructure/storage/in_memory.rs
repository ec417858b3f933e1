//! In-memory record store

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::storage::{field_equals, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory collection
///
/// Used by tests and the `memory` backend. Data is lost when the process exits.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    documents: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a collection pre-populated with documents
    pub fn with_entities(entities: Vec<E>) -> Self {
        let documents = entities
            .into_iter()
            .map(|entity| (entity.key().as_str().to_string(), entity))
            .collect();

        Self {
            documents: RwLock::new(documents),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, E>>, DomainError> {
        self.documents.read().map_err(|e| {
            DomainError::storage(format!(
                "Failed to acquire read lock on '{}': {}",
                E::COLLECTION,
                e
            ))
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, E>>, DomainError> {
        self.documents.write().map_err(|e| {
            DomainError::storage(format!(
                "Failed to acquire write lock on '{}': {}",
                E::COLLECTION,
                e
            ))
        })
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        Ok(self.read()?.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn find_by(&self, field: &str, value: &str) -> Result<Vec<E>, DomainError> {
        let documents = self.read()?;
        let mut matches = Vec::new();

        for entity in documents.values() {
            if field_equals(entity, field, value)? {
                matches.push(entity.clone());
            }
        }

        Ok(matches)
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut documents = self.write()?;

        if documents.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Document '{}' already exists in '{}'",
                key,
                E::COLLECTION
            )));
        }

        documents.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut documents = self.write()?;

        if !documents.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "Document '{}' not found in '{}'",
                key,
                E::COLLECTION
            )));
        }

        documents.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.write()?.remove(key.as_str()).is_some())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.read()?.contains_key(key.as_str()))
    }
}
