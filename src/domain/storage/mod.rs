//! Storage domain - document store abstraction

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::{field_equals, Storage};

#[cfg(test)]
pub use repository::mock;
