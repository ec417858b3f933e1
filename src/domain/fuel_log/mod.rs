//! Fuel purchase log
//!
//! Purchases are modelled so callers can be written against them, but there
//! is no persistence behind the trait yet.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;
use crate::domain::vehicle::VehicleId;
use crate::domain::DomainError;

/// A single fill-up at a station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelPurchase {
    pub id: String,
    pub user_id: UserId,
    pub vehicle_id: VehicleId,
    pub liters: f64,
    pub price_per_liter: f64,
    pub total_cost: f64,
    pub odometer_km: Option<f64>,
    pub station_id: Option<String>,
    pub purchased_at: DateTime<Utc>,
}

#[async_trait]
pub trait FuelLogRepository: Send + Sync {
    async fn record(&self, purchase: FuelPurchase) -> Result<FuelPurchase, DomainError>;

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<FuelPurchase>, DomainError>;
}
