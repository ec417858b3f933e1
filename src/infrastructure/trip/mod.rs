//! Trip infrastructure

mod repository;
mod service;

pub use repository::StorageTripRepository;
pub use service::{RecordTripRequest, TripService, TripServiceTrait};
