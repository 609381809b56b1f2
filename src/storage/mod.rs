//! Key/value storage backends for favr
//!
//! The favorites store only needs three operations from its backend: read a
//! string by key, write a string under a key, and delete a key. This module
//! defines that contract as [`KeyValueStore`] and ships two implementations:
//!
//! - [`SledStore`]: durable backend on top of a sled tree
//! - [`MemoryStore`]: in-memory map with an optional byte quota

use sled::{Db, Tree};
use std::path::Path;

pub mod error;
pub mod memory;

pub use error::StorageError;
pub use memory::MemoryStore;

/// Name of the sled tree holding all favr keys
const TREE_NAME: &str = "kv";

/// String key/value backend used by the favorites store
///
/// Implementations may fail on any call; `set` in particular may fail when a
/// quota is exhausted.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Durable key/value store backed by sled
pub struct SledStore {
    db: Db,
    tree: Tree,
}

impl SledStore {
    /// Opens or creates a store at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use favr::storage::{KeyValueStore, SledStore};
    /// let store = SledStore::open("my_registry").unwrap();
    /// store.set("greeting", "hello").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        let tree = db.open_tree(TREE_NAME)?;
        Ok(Self { db, tree })
    }

    /// Flush pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.tree.get(key.as_bytes())? {
            Some(value) => String::from_utf8(value.to_vec())
                .map(Some)
                .map_err(|_| StorageError::InvalidUtf8 {
                    key: key.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.tree.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.tree.remove(key.as_bytes())?;
        Ok(())
    }
}

impl Drop for SledStore {
    fn drop(&mut self) {
        // Best-effort flush; callers needing durability should call flush()
        let _ = self.db.flush();
    }
}
