//! The favorites store
//!
//! [`FavoritesStore`] is the only writer of the persisted registry. Every
//! operation reads the current registry from the backend, applies the change,
//! writes it back and then publishes a [`ChangeEvent`] on its
//! [`EventChannel`]. Failures never reach the caller:
//!
//! - a corrupt persisted registry is deleted and replaced by the default
//! - a rejected add or remove returns `false`
//! - a failed backend write is logged; the mutation still reports success
//!
//! Two stores sharing one backend do not coordinate: the last write wins.
//!
//! # Examples
//!
//! ```
//! use favr::favorites::{FavoriteKind, FavoritesStore};
//! use favr::storage::MemoryStore;
//!
//! let store = FavoritesStore::new(MemoryStore::new());
//! assert!(store.add_tool("palette"));
//! assert!(!store.add_tool("palette"));
//! assert!(store.is_favorite("palette", FavoriteKind::Tool));
//! assert!(store.toggle_tool("palette") && !store.is_favorite("palette", FavoriteKind::Tool));
//! ```

use tracing::{debug, warn};

use crate::FavrError;
use crate::clock::{Clock, SystemClock};
use crate::events::{ChangeEvent, EventChannel, Listener};
use crate::storage::KeyValueStore;

pub mod error;
pub mod types;
pub mod validate;

pub use error::RegistryError;
pub use types::{DEFAULT_MAX_ITEMS, FavoriteKind, FavoritesRegistry};

/// Storage key of the unified registry
pub const FAVORITES_KEY: &str = "favorites_registry";

/// Capacity-limited favorites registry over a key/value backend
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    channel: EventChannel,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Store with its own event channel and the system clock
    pub fn new(storage: S) -> Self {
        Self::with_parts(storage, EventChannel::new(), Box::new(SystemClock))
    }

    /// Store publishing on a shared `channel` and stamping events with `clock`
    pub fn with_parts(storage: S, channel: EventChannel, clock: Box<dyn Clock>) -> Self {
        Self {
            storage,
            channel,
            clock,
        }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the current registry
    ///
    /// Returns the default registry when nothing is stored, when the backend
    /// cannot be read, or when the stored value is corrupt. A corrupt value is
    /// deleted from the backend.
    pub fn get_favorites(&self) -> FavoritesRegistry {
        let raw = match self.storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return FavoritesRegistry::default(),
            Err(err) => {
                warn!(error = %err, "could not read favorites, using an empty registry");
                return FavoritesRegistry::default();
            }
        };

        match validate::parse_registry(&raw) {
            Ok(registry) => registry,
            Err(err) => {
                warn!(error = %err, "discarding corrupt favorites registry");
                if let Err(err) = self.storage.remove(FAVORITES_KEY) {
                    warn!(error = %err, "could not delete corrupt favorites registry");
                }
                FavoritesRegistry::default()
            }
        }
    }

    /// Validate and write `registry`, reporting any failure
    ///
    /// # Errors
    ///
    /// Returns `FavrError::Registry` for an invalid registry (nothing is
    /// written) and `FavrError::Storage` when the backend rejects the write.
    pub fn try_save_favorites(&self, registry: &FavoritesRegistry) -> Result<(), FavrError> {
        validate::validate_registry(registry)?;
        let raw = serde_json::to_string(registry).map_err(RegistryError::from)?;
        self.storage.set(FAVORITES_KEY, &raw)?;
        Ok(())
    }

    /// Validate and write `registry`; failures are logged and swallowed
    pub fn save_favorites(&self, registry: &FavoritesRegistry) {
        match self.try_save_favorites(registry) {
            Ok(()) => debug!(total = registry.total(), "favorites saved"),
            Err(FavrError::Registry(err)) => {
                warn!(error = %err, "refusing to save invalid favorites registry");
            }
            Err(err) => warn!(error = %err, "failed to persist favorites"),
        }
    }

    /// Append `id` to the `kind` list
    ///
    /// Returns `false` without changing anything when `id` is already in the
    /// list or the registry is at capacity.
    pub fn add(&self, kind: FavoriteKind, id: &str) -> bool {
        let mut registry = self.get_favorites();

        if registry.contains(kind, id) {
            debug!(%kind, id, "already a favorite");
            return false;
        }
        if registry.is_full() {
            debug!(%kind, id, max_items = registry.max_items, "favorites are at capacity");
            return false;
        }

        registry.list_mut(kind).push(id.to_string());
        self.save_favorites(&registry);
        self.channel
            .publish(&ChangeEvent::added(kind, id, self.clock.now()));
        true
    }

    /// Remove `id` from the `kind` list; `false` if it was not there
    pub fn remove(&self, kind: FavoriteKind, id: &str) -> bool {
        let mut registry = self.get_favorites();

        let list = registry.list_mut(kind);
        let Some(position) = list.iter().position(|existing| existing == id) else {
            debug!(%kind, id, "not a favorite");
            return false;
        };
        list.remove(position);

        self.save_favorites(&registry);
        self.channel
            .publish(&ChangeEvent::removed(kind, id, self.clock.now()));
        true
    }

    /// Remove `id` if it is a favorite, add it otherwise
    pub fn toggle(&self, kind: FavoriteKind, id: &str) -> bool {
        if self.is_favorite(id, kind) {
            self.remove(kind, id)
        } else {
            self.add(kind, id)
        }
    }

    pub fn add_suite(&self, id: &str) -> bool {
        self.add(FavoriteKind::Suite, id)
    }

    pub fn add_tool(&self, id: &str) -> bool {
        self.add(FavoriteKind::Tool, id)
    }

    pub fn remove_suite(&self, id: &str) -> bool {
        self.remove(FavoriteKind::Suite, id)
    }

    pub fn remove_tool(&self, id: &str) -> bool {
        self.remove(FavoriteKind::Tool, id)
    }

    pub fn toggle_suite(&self, id: &str) -> bool {
        self.toggle(FavoriteKind::Suite, id)
    }

    pub fn toggle_tool(&self, id: &str) -> bool {
        self.toggle(FavoriteKind::Tool, id)
    }

    pub fn is_favorite(&self, id: &str, kind: FavoriteKind) -> bool {
        self.get_favorites().contains(kind, id)
    }

    /// Replace the registry with an empty one of default capacity and
    /// publish an `all-cleared` event
    pub fn clear_all(&self) {
        self.save_favorites(&FavoritesRegistry::default());
        self.channel.publish(&ChangeEvent::cleared(self.clock.now()));
    }

    pub fn add_listener(&self, listener: Listener) {
        self.channel.subscribe(listener);
    }

    pub fn remove_listener(&self, listener: &Listener) {
        self.channel.unsubscribe(listener);
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
