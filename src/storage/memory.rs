//! In-memory key/value backend
//!
//! Clones share the same map, so two stores built from clones of one
//! `MemoryStore` behave like two instances sharing one durable backend.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{KeyValueStore, StorageError};

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl Inner {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// In-memory key/value store keyed by string
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    /// Create an empty store without a quota
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose keys and values may use at most `quota` bytes
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().quota = Some(quota);
        store
    }

    /// Change (or lift) the byte quota on the shared map
    pub fn set_quota(&self, quota: Option<usize>) {
        self.inner.borrow_mut().quota = quota;
    }

    /// Whether `key` currently holds a value
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Whether the store holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.borrow().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(quota) = inner.quota {
            let needed = inner.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().entries.remove(key);
        Ok(())
    }
}
