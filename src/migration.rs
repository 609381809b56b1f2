//! Import of pre-registry favorites
//!
//! Before the unified registry existed, favorites were kept as two flat JSON
//! arrays of identifiers: one under [`LEGACY_TOOLS_KEY`] and one under
//! [`LEGACY_SUITES_KEY`]. Migration folds those arrays into the registry via
//! the store's public `add` operations, so capacity and duplicate rules (and
//! change events) apply exactly as they do for interactive adds. Entries that
//! no longer fit are dropped.
//!
//! [`initialize_favorites_system`] is the startup entry point and is safe to
//! call repeatedly.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::FavrError;
use crate::diagnostics::{FavoritesStats, get_favorites_stats};
use crate::favorites::{FavoriteKind, FavoritesStore};
use crate::storage::KeyValueStore;

/// Legacy key holding a JSON array of tool identifiers
pub const LEGACY_TOOLS_KEY: &str = "favorite_tools";
/// Legacy key holding a JSON array of suite identifiers
pub const LEGACY_SUITES_KEY: &str = "favorite_suites";

const LEGACY_KEYS: [(FavoriteKind, &str); 2] = [
    (FavoriteKind::Tool, LEGACY_TOOLS_KEY),
    (FavoriteKind::Suite, LEGACY_SUITES_KEY),
];

/// What a migration run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Suites added to the registry
    pub suites_migrated: usize,
    /// Tools added to the registry
    pub tools_migrated: usize,
    /// Entries already present in the registry
    pub already_present: usize,
    /// Entries the store refused, i.e. capacity was reached
    pub dropped: usize,
    /// Legacy keys that could not be parsed as an array of identifiers
    pub unreadable_keys: Vec<&'static str>,
    /// Whether the legacy keys were deleted afterwards
    pub cleaned_up: bool,
}

impl MigrationReport {
    #[must_use]
    pub const fn migrated(&self) -> usize {
        self.suites_migrated + self.tools_migrated
    }

    fn record_added(&mut self, kind: FavoriteKind) {
        match kind {
            FavoriteKind::Suite => self.suites_migrated += 1,
            FavoriteKind::Tool => self.tools_migrated += 1,
        }
    }
}

/// Whether either legacy key holds a value, valid or not
///
/// A backend read failure counts as "no legacy data".
pub fn needs_migration<S: KeyValueStore>(store: &FavoritesStore<S>) -> bool {
    LEGACY_KEYS.iter().any(|(_, key)| match store.storage().get(key) {
        Ok(value) => value.is_some(),
        Err(err) => {
            warn!(key, error = %err, "could not check legacy favorites");
            false
        }
    })
}

/// Parse a legacy value into its string identifiers
fn parse_legacy(key: &str, raw: &str) -> Option<Vec<String>> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, error = %err, "legacy favorites are not valid JSON");
            return None;
        }
    };

    let Value::Array(entries) = value else {
        warn!(key, "legacy favorites are not an array");
        return None;
    };

    let ids = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(id) => Some(id),
            other => {
                warn!(key, entry = %other, "skipping non-string legacy favorite");
                None
            }
        })
        .collect();
    Some(ids)
}

/// Run the migration, reporting backend failures
///
/// # Errors
///
/// Returns `FavrError::Storage` when a legacy key cannot be read or deleted.
/// Unparseable legacy values are not errors; they are listed in
/// [`MigrationReport::unreadable_keys`].
pub fn try_migrate_legacy_favorites<S: KeyValueStore>(
    store: &FavoritesStore<S>,
) -> Result<MigrationReport, FavrError> {
    let mut report = MigrationReport::default();

    for (kind, key) in LEGACY_KEYS {
        let Some(raw) = store.storage().get(key)? else {
            continue;
        };
        let Some(ids) = parse_legacy(key, &raw) else {
            report.unreadable_keys.push(key);
            continue;
        };

        for id in ids {
            if store.is_favorite(&id, kind) {
                report.already_present += 1;
            } else if store.add(kind, &id) {
                report.record_added(kind);
            } else {
                debug!(%kind, id = %id, "legacy favorite dropped");
                report.dropped += 1;
            }
        }
    }

    if report.migrated() > 0 {
        for (_, key) in LEGACY_KEYS {
            store.storage().remove(key)?;
        }
        report.cleaned_up = true;
    }

    info!(
        suites = report.suites_migrated,
        tools = report.tools_migrated,
        dropped = report.dropped,
        cleaned_up = report.cleaned_up,
        "legacy favorites migrated"
    );
    Ok(report)
}

/// Import legacy favorites into the registry
///
/// Returns `false` only when the backend failed; parse problems with one
/// legacy key are logged and do not stop the other key from migrating.
pub fn migrate_legacy_favorites<S: KeyValueStore>(store: &FavoritesStore<S>) -> bool {
    match try_migrate_legacy_favorites(store) {
        Ok(_) => true,
        Err(err) => {
            error!(error = %err, "legacy favorites migration failed");
            false
        }
    }
}

/// Startup entry point: migrate when legacy data exists, then log a summary
pub fn initialize_favorites_system<S: KeyValueStore>(store: &FavoritesStore<S>) -> FavoritesStats {
    if needs_migration(store) {
        migrate_legacy_favorites(store);
    }

    let stats = get_favorites_stats(store);
    info!(
        suites = stats.suite_count,
        tools = stats.tool_count,
        max_items = stats.max_items,
        "favorites ready"
    );
    stats
}
