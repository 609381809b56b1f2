//! Registry validation errors

use thiserror::Error;

/// Why a persisted or in-memory registry was rejected
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The stored text is not JSON
    #[error("Malformed registry: {0}")]
    Parse(#[from] serde_json::Error),

    /// JSON parsed but does not have the registry shape
    #[error("Invalid registry shape: {0}")]
    InvalidShape(String),

    /// `maxItems` is not a positive whole number
    #[error("Invalid registry capacity: {0}")]
    InvalidCapacity(String),
}
