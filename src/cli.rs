//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for favr using the `clap` crate.
//!
//! # Commands
//!
//! - **list**: Show favorites (default)
//! - **add** / **remove** / **toggle**: Change favorites of one kind
//! - **check**: Ask whether an identifier is a favorite
//! - **clear**: Remove every favorite
//! - **stats** / **verify** / **debug**: Diagnostics
//! - **migrate**: Import favorites stored in the legacy format
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use favr::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["favr", "add", "tool", "palette", "outline"]);
//! match cli.get_command() {
//!     Commands::Add { ids, .. } => assert_eq!(ids, vec!["palette", "outline"]),
//!     _ => unreachable!(),
//! }
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::favorites::FavoriteKind;

/// Favorite namespace as given on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// Suite identifiers
    #[value(alias = "suites", alias = "s")]
    Suite,
    /// Tool identifiers
    #[value(alias = "tools", alias = "t")]
    Tool,
}

impl From<KindArg> for FavoriteKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Suite => Self::Suite,
            KindArg::Tool => Self::Tool,
        }
    }
}

/// Manage favorite suites and tools
#[derive(Parser, Debug)]
#[command(name = "favr", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Registry database to use (overrides config)
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show favorites (default)
    #[command(visible_alias = "ls")]
    List {
        /// Only show one kind
        #[arg(short = 'k', long = "kind", value_enum)]
        kind: Option<KindArg>,

        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add favorites
    #[command(visible_alias = "a")]
    Add {
        #[arg(value_enum)]
        kind: KindArg,

        /// Identifiers to add, in order
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },

    /// Remove favorites
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(value_enum)]
        kind: KindArg,

        /// Identifiers to remove
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },

    /// Add a favorite if missing, remove it otherwise
    #[command(visible_alias = "t")]
    Toggle {
        #[arg(value_enum)]
        kind: KindArg,

        #[arg(value_name = "ID")]
        id: String,
    },

    /// Check whether an identifier is a favorite
    Check {
        #[arg(value_enum)]
        kind: KindArg,

        #[arg(value_name = "ID")]
        id: String,
    },

    /// Remove every favorite and reset the capacity
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Show usage statistics
    Stats {
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the registry for duplicates and capacity violations
    Verify,

    /// Dump the registry, statistics and integrity result
    Debug,

    /// Import favorites from the legacy storage format
    Migrate,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command to execute, defaulting to `list`
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List {
            kind: None,
            json: false,
        })
    }
}
