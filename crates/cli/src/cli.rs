//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mortydex_core::types::{parse_character_id, CharacterId};

#[derive(Debug, Parser)]
#[command(name = "mortydex", version, about = "Browse the Rick and Morty character catalog and keep favorites")]
pub struct Cli {
    /// Catalog base URL (overrides CATALOG_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Favorites file (overrides FAVORITES_PATH).
    #[arg(long, global = true)]
    pub favorites_path: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides REQUEST_TIMEOUT_SECS).
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive browser with listing and favorites tabs (default).
    Shell,
    /// Print one page of the catalog listing.
    Page {
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        number: u32,
    },
    /// Search characters by name.
    Search { name: String },
    /// Show the detail card of one character.
    Show {
        #[arg(value_parser = parse_character_id)]
        id: CharacterId,
    },
    /// Like or unlike one character.
    Like {
        #[arg(value_parser = parse_character_id)]
        id: CharacterId,
    },
    /// List favorite characters.
    Favorites,
}
