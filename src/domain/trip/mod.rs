//! Trip domain

mod entity;
mod repository;

pub use entity::{GeoPoint, Trip, TripId, TripValidationError};
pub use repository::TripRepository;

#[cfg(test)]
pub use repository::MockTripRepository;
