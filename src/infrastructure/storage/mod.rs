//! Record store backends

mod factory;
mod in_memory;
mod postgres;

pub use factory::{Collections, StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use postgres::{PostgresConfig, PostgresStorage};
