//! Application state for shared services

use std::sync::Arc;

use crate::domain::station::FuelStationLocator;
use crate::infrastructure::budget::{BudgetService, BudgetServiceTrait};
use crate::infrastructure::storage::Collections;
use crate::infrastructure::trip::{StorageTripRepository, TripService, TripServiceTrait};
use crate::infrastructure::unwired::UnwiredStationLocator;
use crate::infrastructure::user::{StorageUserRepository, UserService, UserServiceTrait};
use crate::infrastructure::vehicle::{
    StorageVehicleRepository, VehicleService, VehicleServiceTrait,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub vehicle_service: Arc<dyn VehicleServiceTrait>,
    pub trip_service: Arc<dyn TripServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub station_locator: Arc<dyn FuelStationLocator>,
    pub collections: Collections,
}

impl AppState {
    /// Wire every service on top of the given collections
    pub fn from_collections(collections: Collections) -> Self {
        let users = Arc::new(StorageUserRepository::new(collections.users.clone()));
        let vehicles = Arc::new(StorageVehicleRepository::new(collections.vehicles.clone()));
        let trips = Arc::new(StorageTripRepository::new(collections.trips.clone()));

        Self {
            user_service: Arc::new(UserService::new(users.clone())),
            vehicle_service: Arc::new(VehicleService::new(users.clone(), vehicles.clone())),
            trip_service: Arc::new(TripService::new(users.clone(), vehicles, trips.clone())),
            budget_service: Arc::new(BudgetService::new(users, trips)),
            station_locator: Arc::new(UnwiredStationLocator),
            collections,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_collections(Collections::in_memory())
    }
}
