//! Fuel station lookup

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::trip::GeoPoint;
use crate::domain::vehicle::FuelType;
use crate::domain::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelStation {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub fuel_types: Vec<FuelType>,
    pub price_per_liter: Option<f64>,
}

/// Finds stations near a coordinate
#[async_trait]
pub trait FuelStationLocator: Send + Sync {
    async fn nearby(
        &self,
        location: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<FuelStation>, DomainError>;
}
