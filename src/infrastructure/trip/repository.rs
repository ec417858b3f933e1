//! Storage-backed trip repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::trip::{Trip, TripId, TripRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StorageTripRepository {
    storage: Arc<dyn Storage<Trip>>,
}

impl StorageTripRepository {
    pub fn new(storage: Arc<dyn Storage<Trip>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TripRepository for StorageTripRepository {
    async fn get(&self, id: &TripId) -> Result<Option<Trip>, DomainError> {
        self.storage.get(id).await
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Trip>, DomainError> {
        self.storage.find_by("user_id", user_id.as_str()).await
    }

    async fn create(&self, trip: Trip) -> Result<Trip, DomainError> {
        self.storage.create(trip).await
    }

    async fn update(&self, trip: Trip) -> Result<Trip, DomainError> {
        self.storage.update(trip).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockStorage;
    use crate::domain::trip::GeoPoint;
    use crate::domain::vehicle::VehicleId;
    use chrono::Utc;

    fn trip(id: &str, user: &str) -> Trip {
        Trip::new(
            id,
            UserId::new(user).unwrap(),
            VehicleId::from("veh-1"),
            Utc::now(),
            GeoPoint::new(0.0, 0.0),
        )
    }

    #[tokio::test]
    async fn test_list_by_user_filters_on_owner() {
        let storage = MockStorage::new()
            .with_entity(trip("trip-1", "ana"))
            .with_entity(trip("trip-2", "bruno"))
            .with_entity(trip("trip-3", "ana"));
        let repository = StorageTripRepository::new(Arc::new(storage));

        let mut ids: Vec<String> = repository
            .list_by_user(&UserId::new("ana").unwrap())
            .await
            .unwrap()
            .iter()
            .map(|t| t.id().to_string())
            .collect();
        ids.sort();

        assert_eq!(ids, vec!["trip-1", "trip-3"]);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let storage = MockStorage::<Trip>::new().with_error("connection reset");
        let repository = StorageTripRepository::new(Arc::new(storage));

        let err = repository
            .list_by_user(&UserId::new("ana").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Storage { .. }));
    }
}
