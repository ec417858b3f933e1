//! Domain layer - Core business logic and entities

pub mod budget;
pub mod error;
pub mod fuel_log;
pub mod session;
pub mod station;
pub mod storage;
pub mod telemetry;
pub mod trip;
pub mod user;
pub mod vehicle;

pub use budget::{
    monthly_usage, AlertSeverity, BudgetAlert, BudgetStatus, BudgetValidationError, MonthPeriod,
    UsageSummary,
};
pub use error::DomainError;
pub use fuel_log::{FuelLogRepository, FuelPurchase};
pub use session::{Session, SessionState};
pub use station::{FuelStation, FuelStationLocator};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use telemetry::{TelemetryConnector, TelemetrySample};
pub use trip::{GeoPoint, Trip, TripId, TripRepository, TripValidationError};
pub use user::{parse_user_id, Role, User, UserId, UserRepository, UserValidationError};
pub use vehicle::{FuelType, Vehicle, VehicleId, VehicleRepository};
