//! Vehicle entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Vehicle identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("veh-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for VehicleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VehicleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for VehicleId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gasoline => write!(f, "gasoline"),
            Self::Diesel => write!(f, "diesel"),
            Self::Hybrid => write!(f, "hybrid"),
            Self::Electric => write!(f, "electric"),
        }
    }
}

impl std::str::FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gasoline" | "petrol" => Ok(Self::Gasoline),
            "diesel" => Ok(Self::Diesel),
            "hybrid" => Ok(Self::Hybrid),
            "electric" | "ev" => Ok(Self::Electric),
            other => Err(format!("Unknown fuel type '{}'", other)),
        }
    }
}

/// A vehicle registered by a user
///
/// At most one vehicle per user is active; the vehicle service keeps that
/// true, the store does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    pub user_id: UserId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub fuel_type: FuelType,
    pub license_plate: String,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(
        id: impl Into<VehicleId>,
        user_id: UserId,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        fuel_type: FuelType,
        license_plate: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id,
            make: make.into(),
            model: model.into(),
            year,
            fuel_type,
            license_plate: license_plate.into(),
            is_active: false,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Human readable label, e.g. "2019 Toyota Corolla (ABC-1234)"
    pub fn label(&self) -> String {
        format!(
            "{} {} {} ({})",
            self.year, self.make, self.model, self.license_plate
        )
    }
}

impl StorageEntity for Vehicle {
    type Key = VehicleId;
    const COLLECTION: &'static str = "vehicles";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
