//! Fuel Tracker API
//!
//! Trip logging and monthly fuel budget accounting:
//! - Citizen profiles spend against a personal budget
//! - Driver profiles spend against a company fuel limit
//! - Usage, status and threshold alerts are derived from recorded trips

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::str::FromStr;

use api::state::AppState;
use config::StorageSettings;
use domain::DomainError;
use infrastructure::storage::{PostgresConfig, StorageConfig, StorageFactory, StorageType};
use tracing::info;

/// Create the application state with in-memory storage
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = storage_config(&config.storage, std::env::var("DATABASE_URL").ok())?;
    info!(backend = %storage_config.storage_type(), "Opening record store");

    let collections = StorageFactory::open(&storage_config).await?;
    Ok(AppState::from_collections(collections))
}

/// Resolve the configured backend; Postgres needs a URL from config or `DATABASE_URL`
fn storage_config(
    settings: &StorageSettings,
    env_database_url: Option<String>,
) -> Result<StorageConfig, DomainError> {
    match StorageType::from_str(&settings.backend)? {
        StorageType::InMemory => Ok(StorageConfig::in_memory()),
        StorageType::Postgres => {
            let url = settings
                .database_url
                .clone()
                .or(env_database_url)
                .ok_or_else(|| {
                    DomainError::configuration(
                        "Postgres storage requires storage.database_url or DATABASE_URL",
                    )
                })?;

            Ok(StorageConfig::postgres(
                PostgresConfig::new(url).with_max_connections(settings.max_connections),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(backend: &str, url: Option<&str>) -> StorageSettings {
        StorageSettings {
            backend: backend.to_string(),
            database_url: url.map(str::to_string),
            max_connections: 4,
        }
    }

    #[test]
    fn test_memory_backend() {
        let config = storage_config(&settings("memory", None), None).unwrap();
        assert_eq!(config.storage_type(), StorageType::InMemory);
    }

    #[test]
    fn test_postgres_prefers_configured_url() {
        let config = storage_config(
            &settings("postgres", Some("postgres://config/fuel")),
            Some("postgres://env/fuel".to_string()),
        )
        .unwrap();

        match config {
            StorageConfig::Postgres(pg) => {
                assert_eq!(pg.url, "postgres://config/fuel");
                assert_eq!(pg.max_connections, 4);
            }
            StorageConfig::InMemory => panic!("expected postgres"),
        }
    }

    #[test]
    fn test_postgres_falls_back_to_env_url() {
        let config = storage_config(
            &settings("postgres", None),
            Some("postgres://env/fuel".to_string()),
        )
        .unwrap();

        assert!(matches!(config, StorageConfig::Postgres(pg) if pg.url == "postgres://env/fuel"));
    }

    #[test]
    fn test_postgres_without_url_is_a_configuration_error() {
        let err = storage_config(&settings("postgres", None), None).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_unknown_backend() {
        assert!(storage_config(&settings("redis", None), None).is_err());
    }

    #[tokio::test]
    async fn test_default_state_is_in_memory() {
        let state = create_app_state().await.unwrap();
        assert!(state.user_service.get("nobody").await.is_err());
    }
}
