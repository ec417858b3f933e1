//! PostgreSQL document store

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

const UNIQUE_VIOLATION: &str = "23505";

/// `(data->>'field')` for a plain snake_case field name
///
/// Shared by `find_by` and `ensure_field_index` so the query text matches the
/// index definition exactly.
fn field_expression(field: &str) -> Result<String, DomainError> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if !valid {
        return Err(DomainError::invalid_argument(format!(
            "Invalid document field name '{}'",
            field
        )));
    }

    Ok(format!("(data->>'{}')", field))
}

/// PostgreSQL connection settings
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/fuel_tracker".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Opens a pool that every collection shares
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

/// One collection stored as JSONB documents
///
/// Table layout is `(key, data, created_at, updated_at)`; the table is named
/// after the entity's collection.
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    table_name: String,
    _phantom: PhantomData<E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    pub fn new(pool: PgPool) -> Self {
        Self::with_table(pool, E::COLLECTION)
    }

    pub fn with_table(pool: PgPool, table_name: impl Into<String>) -> Self {
        Self {
            pool,
            table_name: table_name.into(),
            _phantom: PhantomData,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                key VARCHAR(255) PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table_name
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to create table '{}': {}",
                    self.table_name, e
                ))
            })?;

        Ok(())
    }

    /// Adds an expression index so `find_by(field, ..)` does not scan the table
    pub async fn ensure_field_index(&self, field: &str) -> Result<(), DomainError> {
        let query = format!(
            "CREATE INDEX IF NOT EXISTS {table}_{field}_idx ON {table} ({expr})",
            table = self.table_name,
            field = field,
            expr = field_expression(field)?
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to index '{}' on '{}': {}",
                    field, self.table_name, e
                ))
            })?;

        Ok(())
    }

    fn decode(row: &PgRow) -> Result<E, DomainError> {
        let data: serde_json::Value = row
            .try_get("data")
            .map_err(|e| DomainError::storage(format!("Failed to read document: {}", e)))?;

        serde_json::from_value(data)
            .map_err(|e| DomainError::storage(format!("Failed to deserialize document: {}", e)))
    }

    fn encode(entity: &E) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(entity)
            .map_err(|e| DomainError::storage(format!("Failed to serialize document: {}", e)))
    }
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let query = format!("SELECT data FROM {} WHERE key = $1", self.table_name);

        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get document: {}", e)))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let query = format!("SELECT data FROM {} ORDER BY created_at", self.table_name);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list documents: {}", e)))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn find_by(&self, field: &str, value: &str) -> Result<Vec<E>, DomainError> {
        // Field is inlined, not bound, so the query matches the expression index
        let query = format!(
            "SELECT data FROM {} WHERE {} = $1 ORDER BY created_at",
            self.table_name,
            field_expression(field)?
        );

        let rows = sqlx::query(&query)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to query documents: {}", e)))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let data = Self::encode(&entity)?;

        let query = format!("INSERT INTO {} (key, data) VALUES ($1, $2)", self.table_name);

        sqlx::query(&query)
            .bind(&key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .and_then(|db| db.code())
                    .is_some_and(|code| code == UNIQUE_VIOLATION);

                if duplicate {
                    DomainError::conflict(format!(
                        "Document '{}' already exists in '{}'",
                        key, self.table_name
                    ))
                } else {
                    DomainError::storage(format!("Failed to create document: {}", e))
                }
            })?;

        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let data = Self::encode(&entity)?;

        let query = format!(
            "UPDATE {} SET data = $2, updated_at = NOW() WHERE key = $1",
            self.table_name
        );

        let result = sqlx::query(&query)
            .bind(&key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update document: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Document '{}' not found in '{}'",
                key, self.table_name
            )));
        }

        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let query = format!("DELETE FROM {} WHERE key = $1", self.table_name);

        let result = sqlx::query(&query)
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete document: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE key = $1) AS present",
            self.table_name
        );

        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check existence: {}", e)))?;

        row.try_get("present")
            .map_err(|e| DomainError::storage(format!("Failed to read existence flag: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::Trip;
    use crate::domain::user::User;

    #[test]
    fn test_postgres_config_default() {
        let config = PostgresConfig::default();

        assert_eq!(config.url, "postgres://localhost/fuel_tracker");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
    }

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://db/fuel")
            .with_max_connections(20)
            .with_min_connections(2)
            .with_connect_timeout(5);

        assert_eq!(config.url, "postgres://db/fuel");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_table_named_after_collection() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/fuel_tracker")
            .unwrap();

        let users: PostgresStorage<User> = PostgresStorage::new(pool.clone());
        let trips: PostgresStorage<Trip> = PostgresStorage::new(pool);

        assert_eq!(users.table_name(), "users");
        assert_eq!(trips.table_name(), "trips");
        assert!(format!("{:?}", trips).contains("trips"));
    }

    #[test]
    fn test_field_expression_matches_index_definition() {
        assert_eq!(field_expression("user_id").unwrap(), "(data->>'user_id')");
    }

    #[test]
    fn test_field_expression_rejects_unsafe_names() {
        for field in ["", "user_id'; DROP TABLE trips; --", "User", "a-b"] {
            assert!(matches!(
                field_expression(field),
                Err(DomainError::InvalidArgument { .. })
            ));
        }
    }
}
