//! Vehicle domain

mod entity;
mod repository;

pub use entity::{FuelType, Vehicle, VehicleId};
pub use repository::VehicleRepository;

#[cfg(test)]
pub use repository::MockVehicleRepository;
