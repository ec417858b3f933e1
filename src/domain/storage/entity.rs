//! Document traits for the record store

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Opaque document identifier
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    fn as_str(&self) -> &str;
}

/// A document that lives in a named collection of the record store
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    type Key: StorageKey;

    /// Collection (table) the document belongs to
    const COLLECTION: &'static str;

    fn key(&self) -> &Self::Key;
}
