//! Storage-specific error types
//!
//! This module defines all error types that can occur while talking to a
//! key/value backend.
//!
//! # Error Types
//!
//! - **`Sled`**: Errors from the underlying sled embedded database
//! - **`InvalidUtf8`**: A stored value could not be read back as text
//! - **`QuotaExceeded`**: A write would grow the backend past its byte quota
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use thiserror::Error;

/// Key/value backend errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),

    /// Stored bytes are not valid UTF-8
    #[error("Value stored under '{key}' is not valid UTF-8")]
    InvalidUtf8 { key: String },

    /// The write does not fit into the configured quota
    #[error("Quota exceeded while writing '{key}': {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
