//! Favr CLI application entry point
//!
//! This is the main executable for the favr favorites registry. It wires the
//! sled-backed store, the event channel and the legacy importer together and
//! exposes them as subcommands.
//!
//! # Usage
//!
//! ```bash
//! # Show favorites (default command)
//! favr
//! favr list --kind tool
//!
//! # Change favorites
//! favr add suite writing video
//! favr remove tool thumbnails
//! favr toggle tool outline
//!
//! # Diagnostics
//! favr stats --json
//! favr verify
//!
//! # Quiet mode (only output results)
//! favr -q list
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/favr/config.toml` on Linux) and created with defaults on first run.

use dialoguer::{Confirm, theme::ColorfulTheme};
use favr::{
    FavrError,
    cli::{Cli, Commands},
    config::FavrConfig,
    diagnostics,
    events::{ChangeEvent, listener},
    favorites::{FavoriteKind, FavoritesStore},
    logging, migration, output,
    storage::SledStore,
};
use std::process::ExitCode;
use tracing::debug;

type Result<T> = std::result::Result<T, FavrError>;

type Store = FavoritesStore<SledStore>;

/// Ask before wiping the registry
///
/// # Errors
/// Returns `FavrError` if the prompt cannot be shown.
fn confirm(prompt: &str) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| FavrError::InvalidInput(format!("Failed to read confirmation: {e}")))
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| FavrError::InvalidInput(format!("Failed to serialize output: {e}")))
}

fn handle_list_command(store: &Store, kind: Option<FavoriteKind>, json: bool, quiet: bool) -> Result<()> {
    let registry = store.get_favorites();
    if json {
        println!("{}", to_json(&registry)?);
    } else {
        print_lines(&output::registry_lines(&registry, kind, quiet));
    }
    Ok(())
}

/// Apply `op` to every id, reporting the ones that were refused
fn handle_batch(
    ids: &[String],
    quiet: bool,
    refused: &str,
    op: impl Fn(&str) -> bool,
) -> ExitCode {
    let mut failures = 0;
    for id in ids {
        if !op(id) {
            failures += 1;
            if !quiet {
                eprintln!("{id}: {refused}");
            }
        }
    }
    if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn handle_add_command(store: &Store, kind: FavoriteKind, ids: &[String], quiet: bool) -> ExitCode {
    handle_batch(ids, quiet, "already a favorite or no free slot", |id| {
        store.add(kind, id)
    })
}

fn handle_remove_command(store: &Store, kind: FavoriteKind, ids: &[String], quiet: bool) -> ExitCode {
    handle_batch(ids, quiet, "not a favorite", |id| store.remove(kind, id))
}

fn handle_check_command(store: &Store, kind: FavoriteKind, id: &str, quiet: bool) -> ExitCode {
    let found = store.is_favorite(id, kind);
    if !quiet {
        let verdict = if found { "is" } else { "is not" };
        println!("{id} {verdict} a favorite {kind}");
    }
    if found { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn handle_clear_command(store: &Store, yes: bool, config: &FavrConfig, quiet: bool) -> Result<()> {
    let skip_prompt = yes || quiet || !config.confirm_clear;
    if !skip_prompt && !confirm("Remove all favorites?")? {
        println!("Aborted.");
        return Ok(());
    }
    diagnostics::reset_favorites(store);
    Ok(())
}

fn handle_stats_command(store: &Store, json: bool) -> Result<()> {
    let stats = diagnostics::get_favorites_stats(store);
    if json {
        println!("{}", to_json(&stats)?);
    } else {
        print_lines(&output::stats_lines(&stats));
    }
    Ok(())
}

fn handle_verify_command(store: &Store, quiet: bool) -> ExitCode {
    let issues = diagnostics::check_integrity(&store.get_favorites());
    if !quiet {
        print_lines(&output::integrity_lines(&issues));
    }
    if issues.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn handle_debug_command(store: &Store) -> Result<ExitCode> {
    let snapshot = diagnostics::debug_favorites(store);
    println!("{}", to_json(&snapshot)?);
    Ok(if snapshot.is_valid() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn handle_migrate_command(store: &Store, quiet: bool) -> Result<()> {
    if !migration::needs_migration(store) {
        if !quiet {
            println!("No legacy favorites found.");
        }
        return Ok(());
    }

    let report = migration::try_migrate_legacy_favorites(store)?;
    if !quiet {
        println!(
            "Migrated {} suite(s) and {} tool(s); {} already present, {} dropped.",
            report.suites_migrated, report.tools_migrated, report.already_present, report.dropped
        );
        for key in &report.unreadable_keys {
            println!("Could not read legacy key '{key}'.");
        }
    }
    Ok(())
}

fn run() -> Result<ExitCode> {
    let config = FavrConfig::load()?;
    let cli = Cli::parse_args();
    let quiet = cli.quiet || config.quiet;

    logging::init(&config.log_level)?;

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => config.database_path()?,
    };
    debug!(path = %db_path.display(), "opening favorites registry");
    let store = FavoritesStore::new(SledStore::open(&db_path)?);

    let command = cli.get_command();
    if !matches!(command, Commands::Migrate) {
        migration::initialize_favorites_system(&store);
    }

    if !quiet {
        store.add_listener(listener(|event: &ChangeEvent| {
            println!("{}", output::change_line(event));
            Ok(())
        }));
    }

    let code = match command {
        Commands::List { kind, json } => {
            handle_list_command(&store, kind.map(Into::into), json, quiet)?;
            ExitCode::SUCCESS
        }
        Commands::Add { kind, ids } => handle_add_command(&store, kind.into(), &ids, quiet),
        Commands::Remove { kind, ids } => handle_remove_command(&store, kind.into(), &ids, quiet),
        Commands::Toggle { kind, id } => {
            if store.toggle(kind.into(), &id) {
                ExitCode::SUCCESS
            } else {
                if !quiet {
                    eprintln!("{id}: no free slot");
                }
                ExitCode::FAILURE
            }
        }
        Commands::Check { kind, id } => handle_check_command(&store, kind.into(), &id, quiet),
        Commands::Clear { yes } => {
            handle_clear_command(&store, yes, &config, quiet)?;
            ExitCode::SUCCESS
        }
        Commands::Stats { json } => {
            handle_stats_command(&store, json)?;
            ExitCode::SUCCESS
        }
        Commands::Verify => handle_verify_command(&store, quiet),
        Commands::Debug => handle_debug_command(&store)?,
        Commands::Migrate => {
            handle_migrate_command(&store, quiet)?;
            ExitCode::SUCCESS
        }
    };

    store.storage().flush()?;
    Ok(code)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
