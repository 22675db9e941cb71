//! Persisted key-value storage seam.
//!
//! The browser origin gives the storefront a synchronous string-blob store
//! (localStorage). This module abstracts it behind [`KeyValueStore`] so the
//! cart can be exercised against an in-memory store in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Fixed storage key under which the serialized cart lives.
///
/// There is no versioning and no migration path: an incompatible historical
/// shape is handled only by the load-time corruption fallback.
pub const CART_STORAGE_KEY: &str = "shoppingCart";

/// Errors that can occur when reading or writing the persisted store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store refused the write (e.g. quota exhausted).
    #[error("Storage write failed: {0}")]
    WriteFailed(String),

    /// The backing store could not be read.
    #[error("Storage read failed: {0}")]
    ReadFailed(String),
}

/// A synchronous string-blob store scoped to the browser origin.
///
/// All methods take `&self`; implementations use interior mutability for
/// shared access. Values are whole-state blobs, re-written in full on every
/// mutation.
pub trait KeyValueStore: Send + Sync {
    /// Retrieve the blob at `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite the blob at `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory [`KeyValueStore`] used by tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a single entry.
    #[must_use]
    pub fn seeded(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn seeded_store_exposes_seed() {
        let store = MemoryStore::seeded(CART_STORAGE_KEY, "[]");
        assert_eq!(store.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }
}
