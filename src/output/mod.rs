//! Output formatting for CLI display
//!
//! This module turns registries, stats, change events and integrity results
//! into the lines the `favr` binary prints. In quiet mode only the bare
//! identifiers are printed so output can be piped.

use colored::Colorize;

use crate::diagnostics::{FavoritesStats, IntegrityIssue};
use crate::events::{ChangeEvent, ChangeKind};
use crate::favorites::{FavoriteKind, FavoritesRegistry};

/// Heading for a list of favorites
#[must_use]
pub fn section_title(kind: FavoriteKind, count: usize) -> String {
    let title = match kind {
        FavoriteKind::Suite => "Suites",
        FavoriteKind::Tool => "Tools",
    };
    format!("{} ({count})", title.bold())
}

/// Format one favorite, with its 1-based display position
#[must_use]
pub fn favorite_line(position: usize, id: &str, quiet: bool) -> String {
    if quiet {
        id.to_string()
    } else {
        format!("  {}. {}", position, id.cyan())
    }
}

/// Lines for every favorite in `registry`, optionally restricted to one kind
#[must_use]
pub fn registry_lines(
    registry: &FavoritesRegistry,
    only: Option<FavoriteKind>,
    quiet: bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    for kind in FavoriteKind::ALL {
        if only.is_some_and(|wanted| wanted != kind) {
            continue;
        }
        let ids = registry.list(kind);
        if !quiet {
            lines.push(section_title(kind, ids.len()));
            if ids.is_empty() {
                lines.push(format!("  {}", "(none)".dimmed()));
            }
        }
        lines.extend(
            ids.iter()
                .enumerate()
                .map(|(i, id)| favorite_line(i + 1, id, quiet)),
        );
    }

    if !quiet && only.is_none() {
        lines.push(capacity_line(registry));
    }
    lines
}

/// "`used`/`max` slots used, `n` free", colored by how full the registry is
#[must_use]
pub fn capacity_line(registry: &FavoritesRegistry) -> String {
    let used = registry.total();
    let max_items = registry.max_items;
    let text = format!("{used}/{max_items} slots used, {} free", registry.remaining());
    if registry.remaining() == 0 {
        text.red().to_string()
    } else if used * 4 >= max_items * 3 {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}

/// One-line description of a change event
#[must_use]
pub fn change_line(event: &ChangeEvent) -> String {
    let id = event.id.as_deref().unwrap_or_default();
    match event.kind {
        ChangeKind::SuiteAdded | ChangeKind::ToolAdded => {
            format!("{} {} {}", "+".green().bold(), event.kind, id.cyan())
        }
        ChangeKind::SuiteRemoved | ChangeKind::ToolRemoved => {
            format!("{} {} {}", "-".red().bold(), event.kind, id.cyan())
        }
        ChangeKind::AllCleared => format!("{} {}", "✓".green().bold(), event.kind),
    }
}

/// Multi-line stats summary
#[must_use]
pub fn stats_lines(stats: &FavoritesStats) -> Vec<String> {
    vec![
        format!("Suites: {}", stats.suite_count),
        format!("Tools:  {}", stats.tool_count),
        format!("Total:  {}/{}", stats.total_count, stats.max_items),
        format!("Usage:  {}%", stats.usage_percentage),
    ]
}

/// Integrity result, one line per issue
#[must_use]
pub fn integrity_lines(issues: &[IntegrityIssue]) -> Vec<String> {
    if issues.is_empty() {
        return vec![format!("{} Registry is consistent", "✓".green().bold())];
    }
    issues
        .iter()
        .map(|issue| format!("{} {issue}", "✗".red().bold()))
        .collect()
}
