//! InMemoryStore - HashMap-backed key-value store for testing and embedding.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{KeyValueStore, StorageError};

/// In-memory key-value store backed by a HashMap.
///
/// Clone-friendly via Arc (cloning shares the same underlying storage).
/// An optional byte quota models the per-origin limit browsers place on
/// local storage; writes that would push the total of key and value
/// bytes past the quota fail with [`StorageError::QuotaExceeded`].
#[derive(Clone)]
pub struct InMemoryStore {
    storage: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store with no quota.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            quota: None,
        }
    }

    /// Create a new empty store that rejects writes once the total of
    /// key and value bytes would exceed `limit`.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            quota: Some(limit),
        }
    }

    fn used_bytes(storage: &HashMap<String, String>) -> usize {
        storage.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("get"))?;
        Ok(storage.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("set"))?;

        if let Some(limit) = self.quota {
            let replaced = storage.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let projected = Self::used_bytes(&storage) - replaced + key.len() + value.len();
            if projected > limit {
                return Err(StorageError::QuotaExceeded { limit });
            }
        }

        storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("remove"))?;
        storage.remove(key);
        Ok(())
    }
}
