//! Shared API types

pub mod error;
pub mod json;
pub mod tracking;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use tracking::{
    AddVehicleBody, AlertView, AlertsResponse, AmountBody, CompleteTripBody, CreateUserBody,
    PeriodQuery, RecordTripBody, StationQuery, UsageResponse,
};
