//! Vehicle infrastructure

mod repository;
mod service;

pub use repository::StorageVehicleRepository;
pub use service::{AddVehicleRequest, VehicleService, VehicleServiceTrait};
