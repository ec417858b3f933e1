//! Record store trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Document store for one collection of entities
///
/// Backends only honor key lookups and single-field equality queries. Anything
/// richer (date ranges, sums) is computed by the caller.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves a document by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves every document in the collection
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Retrieves the documents whose top-level string `field` equals `value`
    async fn find_by(&self, field: &str, value: &str) -> Result<Vec<E>, DomainError>;

    /// Inserts a new document, Conflict if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Replaces an existing document, NotFound if the key is absent
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Creates or replaces
    async fn save(&self, entity: E) -> Result<E, DomainError> {
        if self.exists(entity.key()).await? {
            self.update(entity).await
        } else {
            self.create(entity).await
        }
    }

    /// Removes a document, returns true if it existed
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }
}

/// Compares a top-level string field of the serialized document
pub fn field_equals<E: StorageEntity>(
    entity: &E,
    field: &str,
    value: &str,
) -> Result<bool, DomainError> {
    let document = serde_json::to_value(entity)
        .map_err(|e| DomainError::storage(format!("Failed to serialize document: {}", e)))?;

    Ok(document.get(field).and_then(|v| v.as_str()) == Some(value))
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::storage::StorageKey;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Storage double that can be switched into a failing state
    #[derive(Debug)]
    pub struct MockStorage<E>
    where
        E: StorageEntity,
    {
        entities: Mutex<HashMap<String, E>>,
        error: Mutex<Option<String>>,
    }

    impl<E> Default for MockStorage<E>
    where
        E: StorageEntity,
    {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<E> MockStorage<E>
    where
        E: StorageEntity,
    {
        pub fn new() -> Self {
            Self {
                entities: Mutex::new(HashMap::new()),
                error: Mutex::new(None),
            }
        }

        pub fn with_entity(self, entity: E) -> Self {
            self.entities
                .lock()
                .unwrap()
                .insert(entity.key().as_str().to_string(), entity);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<E> Storage<E> for MockStorage<E>
    where
        E: StorageEntity + 'static,
    {
        async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().get(key.as_str()).cloned())
        }

        async fn list(&self) -> Result<Vec<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().values().cloned().collect())
        }

        async fn find_by(&self, field: &str, value: &str) -> Result<Vec<E>, DomainError> {
            self.check_error()?;
            let entities = self.entities.lock().unwrap();
            let mut found = Vec::new();

            for entity in entities.values() {
                if field_equals(entity, field, value)? {
                    found.push(entity.clone());
                }
            }

            Ok(found)
        }

        async fn create(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let key = entity.key().as_str().to_string();
            let mut entities = self.entities.lock().unwrap();

            if entities.contains_key(&key) {
                return Err(DomainError::conflict(format!(
                    "Document '{}' already exists in '{}'",
                    key,
                    E::COLLECTION
                )));
            }

            entities.insert(key, entity.clone());
            Ok(entity)
        }

        async fn update(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let key = entity.key().as_str().to_string();
            let mut entities = self.entities.lock().unwrap();

            if !entities.contains_key(&key) {
                return Err(DomainError::not_found(format!(
                    "Document '{}' not found in '{}'",
                    key,
                    E::COLLECTION
                )));
            }

            entities.insert(key, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().remove(key.as_str()).is_some())
        }
    }
}
