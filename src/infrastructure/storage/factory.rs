//! Runtime selection of the record store backend

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::storage::Storage;
use crate::domain::trip::Trip;
use crate::domain::user::User;
use crate::domain::vehicle::Vehicle;
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Supported backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    InMemory,
    Postgres,
}

impl FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}' (expected 'memory' or 'postgres')",
                other
            ))),
        }
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory => write!(f, "memory"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The three collections the service reads and writes
#[derive(Debug, Clone)]
pub struct Collections {
    pub users: Arc<dyn Storage<User>>,
    pub vehicles: Arc<dyn Storage<Vehicle>>,
    pub trips: Arc<dyn Storage<Trip>>,
}

impl Collections {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryStorage::<User>::new()),
            vehicles: Arc::new(InMemoryStorage::<Vehicle>::new()),
            trips: Arc::new(InMemoryStorage::<Trip>::new()),
        }
    }
}

#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Opens every collection on the configured backend
    ///
    /// The PostgreSQL backend shares one pool across collections and creates
    /// missing tables plus a `user_id` index on vehicles and trips.
    pub async fn open(config: &StorageConfig) -> Result<Collections, DomainError> {
        match config {
            StorageConfig::InMemory => {
                tracing::info!("Using in-memory record store");
                Ok(Collections::in_memory())
            }
            StorageConfig::Postgres(pg_config) => {
                tracing::info!(
                    max_connections = pg_config.max_connections,
                    "Connecting to PostgreSQL record store"
                );
                let pool = pg_config.connect().await?;

                let users = PostgresStorage::<User>::new(pool.clone());
                users.ensure_table().await?;

                let vehicles = PostgresStorage::<Vehicle>::new(pool.clone());
                vehicles.ensure_table().await?;
                vehicles.ensure_field_index("user_id").await?;

                let trips = PostgresStorage::<Trip>::new(pool);
                trips.ensure_table().await?;
                trips.ensure_field_index("user_id").await?;

                Ok(Collections {
                    users: Arc::new(users),
                    vehicles: Arc::new(vehicles),
                    trips: Arc::new(trips),
                })
            }
        }
    }
}
