//! Key-value storage - the durable collaborator behind the stores.
//!
//! The browser analog is per-origin local storage: a synchronous,
//! string-keyed map where every write is atomic. Implementations only
//! need `get`/`set`/`remove`; the favorites and reviews stores do a full
//! read-modify-write of one key per mutation and never hold state across
//! calls.
//!
//! ## Example
//!
//! ```ignore
//! use screenscene::{InMemoryStore, KeyValueStore};
//!
//! let store = InMemoryStore::new();
//! store.set("favorites:user-1", "[]")?;
//! let raw = store.get("favorites:user-1")?;
//! ```

mod in_memory;

use std::fmt;

/// Synchronous string-keyed storage. Each `set` is atomic: a reader
/// observes either the previous value or the new one, never a partial
/// write.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`. Returns None if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Error type for storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend-specific failure.
    Backend(String),
    /// Internal lock poisoned.
    LockPoisoned(&'static str),
    /// The write would exceed the store's byte quota.
    QuotaExceeded { limit: usize },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Backend(msg) => write!(f, "storage backend error: {}", msg),
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
            StorageError::QuotaExceeded { limit } => {
                write!(f, "storage quota of {} bytes exceeded", limit)
            }
        }
    }
}

impl std::error::Error for StorageError {}

pub use in_memory::InMemoryStore;
