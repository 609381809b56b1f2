//! Favr - a capacity-limited favorites registry
//!
//! This library keeps two ordered lists of favorited identifiers (suites and
//! tools) under one shared capacity, persists them to a key/value backend, and
//! notifies subscribers synchronously whenever the registry changes.
//!
//! ```
//! use favr::favorites::FavoritesStore;
//! use favr::migration::initialize_favorites_system;
//! use favr::storage::MemoryStore;
//!
//! let store = FavoritesStore::new(MemoryStore::new());
//! initialize_favorites_system(&store);
//!
//! assert!(store.add_suite("video"));
//! assert_eq!(store.get_favorites().suites, vec!["video"]);
//! ```

use thiserror::Error;

pub mod cli;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod events;
pub mod favorites;
pub mod logging;
pub mod migration;
pub mod output;
pub mod storage;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum FavrError {
    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
    /// Registry validation error
    #[error("Registry error: {0}")]
    Registry(#[from] favorites::RegistryError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
