//! Registry data types
//!
//! This module defines the persisted [`FavoritesRegistry`] aggregate and the
//! [`FavoriteKind`] namespaces it is split into.
//!
//! # Types
//!
//! - **`FavoriteKind`**: Which list an identifier belongs to (`suite` or `tool`)
//! - **`FavoritesRegistry`**: Ordered suite and tool identifiers plus the shared capacity
//!
//! The serialized form is the JSON object
//! `{"suites": [...], "tools": [...], "maxItems": n}`.
//!
//! # Examples
//!
//! ```
//! use favr::favorites::{FavoriteKind, FavoritesRegistry};
//!
//! let mut registry = FavoritesRegistry::default();
//! registry.list_mut(FavoriteKind::Tool).push("palette".into());
//!
//! assert!(registry.contains(FavoriteKind::Tool, "palette"));
//! assert!(!registry.contains(FavoriteKind::Suite, "palette"));
//! assert_eq!(registry.total(), 1);
//! ```

use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;

use super::error::RegistryError;

/// Capacity of a freshly created registry
pub const DEFAULT_MAX_ITEMS: usize = 8;

/// The two independent identifier namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Suite,
    Tool,
}

impl FavoriteKind {
    pub const ALL: [Self; 2] = [Self::Suite, Self::Tool];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Suite => "suite",
            Self::Tool => "tool",
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavoriteKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suite" | "suites" => Ok(Self::Suite),
            "tool" | "tools" => Ok(Self::Tool),
            other => Err(RegistryError::InvalidShape(format!(
                "unknown favorite kind '{other}'"
            ))),
        }
    }
}

/// Persisted favorites aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesRegistry {
    /// Favorited suite identifiers in insertion order
    pub suites: Vec<String>,
    /// Favorited tool identifiers in insertion order
    pub tools: Vec<String>,
    /// Combined capacity of `suites` and `tools`
    #[serde(deserialize_with = "deserialize_capacity")]
    pub max_items: usize,
}

/// Reads `maxItems`, accepting whole numbers written as floats
fn deserialize_capacity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    super::validate::capacity_from_number(&number)
        .ok_or_else(|| de::Error::custom(format!("invalid maxItems {number}")))
}

impl Default for FavoritesRegistry {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_ITEMS)
    }
}

impl FavoritesRegistry {
    /// Empty registry holding at most `max_items` identifiers
    #[must_use]
    pub const fn with_capacity(max_items: usize) -> Self {
        Self {
            suites: Vec::new(),
            tools: Vec::new(),
            max_items,
        }
    }

    #[must_use]
    pub fn list(&self, kind: FavoriteKind) -> &[String] {
        match kind {
            FavoriteKind::Suite => &self.suites,
            FavoriteKind::Tool => &self.tools,
        }
    }

    pub fn list_mut(&mut self, kind: FavoriteKind) -> &mut Vec<String> {
        match kind {
            FavoriteKind::Suite => &mut self.suites,
            FavoriteKind::Tool => &mut self.tools,
        }
    }

    #[must_use]
    pub fn contains(&self, kind: FavoriteKind, id: &str) -> bool {
        self.list(kind).iter().any(|existing| existing == id)
    }

    /// Combined number of suites and tools
    #[must_use]
    pub fn total(&self) -> usize {
        self.suites.len() + self.tools.len()
    }

    /// Whether another identifier would exceed `max_items`
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.total() >= self.max_items
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.max_items.saturating_sub(self.total())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
