//! Testing utilities for favr
//!
//! This module provides helpers for writing tests: a `TestSledStore` wrapper
//! for temporary on-disk backends, a memory-backed store with a fixed clock,
//! and a listener that records every event it receives.
//!
//! Only available when compiled with `cfg(test)`.

use chrono::{DateTime, TimeZone, Utc};
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::TempDir;

use crate::clock::FixedClock;
use crate::events::{ChangeEvent, EventChannel, Listener, listener};
use crate::favorites::FavoritesStore;
use crate::storage::{MemoryStore, SledStore};

/// Timestamp every test clock starts at
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

/// Favorites store over a fresh in-memory backend with a fixed clock
pub fn memory_favorites() -> FavoritesStore<MemoryStore> {
    favorites_over(MemoryStore::new())
}

/// Favorites store over `backend` with a fixed clock
pub fn favorites_over(backend: MemoryStore) -> FavoritesStore<MemoryStore> {
    FavoritesStore::with_parts(
        backend,
        EventChannel::new(),
        Box::new(FixedClock::new(test_time())),
    )
}

/// Listener that appends every event to a shared log
pub fn recorder() -> (Listener, Rc<RefCell<Vec<ChangeEvent>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let handle = listener(move |event: &ChangeEvent| {
        sink.borrow_mut().push(event.clone());
        Ok(())
    });
    (handle, events)
}

/// Wrapper for a temporary sled backend that is removed on drop
///
/// # Examples
/// ```ignore
/// let test_store = TestSledStore::new();
/// test_store.store().set("k", "v").unwrap();
/// // Directory removed when test_store is dropped
/// ```
pub struct TestSledStore {
    // Field order matters: the store must be dropped before its directory
    store: SledStore,
    _dir: TempDir,
}

impl TestSledStore {
    /// # Panics
    /// Panics if the temporary directory or the database cannot be created.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SledStore::open(dir.path().join("registry")).expect("Failed to open test store");
        Self { store, _dir: dir }
    }

    pub const fn store(&self) -> &SledStore {
        &self.store
    }
}
