//! Integrity checks and usage statistics
//!
//! Everything here goes through the store's public API; nothing reads or
//! writes the backend directly.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::info;

use crate::favorites::{FavoriteKind, FavoritesRegistry, FavoritesStore};
use crate::storage::KeyValueStore;

/// Registry usage figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesStats {
    pub total_count: usize,
    pub suite_count: usize,
    pub tool_count: usize,
    pub max_items: usize,
    /// `total_count / max_items` as a rounded percentage
    pub usage_percentage: u32,
}

impl FavoritesStats {
    #[must_use]
    pub fn of(registry: &FavoritesRegistry) -> Self {
        let total_count = registry.total();
        let usage_percentage = if registry.max_items == 0 {
            0
        } else {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let pct = (total_count as f64 / registry.max_items as f64 * 100.0).round() as u32;
            pct
        };

        Self {
            total_count,
            suite_count: registry.suites.len(),
            tool_count: registry.tools.len(),
            max_items: registry.max_items,
            usage_percentage,
        }
    }
}

/// A single integrity violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "kebab-case")]
pub enum IntegrityIssue {
    /// `max_items` is zero
    InvalidCapacity,
    /// The same identifier appears more than once in one list
    Duplicates { kind: FavoriteKind, ids: Vec<String> },
    /// More identifiers than `max_items`
    OverCapacity { total: usize, max_items: usize },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity => write!(f, "capacity must be positive"),
            Self::Duplicates { kind, ids } => {
                write!(f, "duplicate {kind} favorites: {}", ids.join(", "))
            }
            Self::OverCapacity { total, max_items } => {
                write!(f, "{total} favorites exceed the capacity of {max_items}")
            }
        }
    }
}

fn duplicates(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();
    for id in ids {
        if !seen.insert(id.as_str()) && !repeated.contains(id) {
            repeated.push(id.clone());
        }
    }
    repeated
}

/// All integrity violations in `registry`
#[must_use]
pub fn check_integrity(registry: &FavoritesRegistry) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    if registry.max_items == 0 {
        issues.push(IntegrityIssue::InvalidCapacity);
    }

    for kind in FavoriteKind::ALL {
        let ids = duplicates(registry.list(kind));
        if !ids.is_empty() {
            issues.push(IntegrityIssue::Duplicates { kind, ids });
        }
    }

    if registry.total() > registry.max_items {
        issues.push(IntegrityIssue::OverCapacity {
            total: registry.total(),
            max_items: registry.max_items,
        });
    }

    issues
}

/// Whether the current registry has no integrity violations
pub fn validate_favorites_integrity<S: KeyValueStore>(store: &FavoritesStore<S>) -> bool {
    check_integrity(&store.get_favorites()).is_empty()
}

pub fn get_favorites_stats<S: KeyValueStore>(store: &FavoritesStore<S>) -> FavoritesStats {
    FavoritesStats::of(&store.get_favorites())
}

/// Empty the registry; see [`FavoritesStore::clear_all`]
pub fn reset_favorites<S: KeyValueStore>(store: &FavoritesStore<S>) {
    store.clear_all();
}

/// Everything `debug_favorites` looked at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugSnapshot {
    pub registry: FavoritesRegistry,
    pub stats: FavoritesStats,
    pub issues: Vec<IntegrityIssue>,
}

impl DebugSnapshot {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Log the registry, its stats and the integrity result; read-only
pub fn debug_favorites<S: KeyValueStore>(store: &FavoritesStore<S>) -> DebugSnapshot {
    let registry = store.get_favorites();
    let stats = FavoritesStats::of(&registry);
    let issues = check_integrity(&registry);

    info!(suites = ?registry.suites, tools = ?registry.tools, max_items = registry.max_items, "favorites registry");
    info!(
        total = stats.total_count,
        usage_percentage = stats.usage_percentage,
        "favorites usage"
    );
    info!(valid = issues.is_empty(), issues = ?issues, "favorites integrity");

    DebugSnapshot {
        registry,
        stats,
        issues,
    }
}
