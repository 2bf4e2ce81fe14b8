//! CLI command definitions for the `pkeep` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod history;
pub mod store;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Prompt history, favorites, and settings storage for the prompt UI.
#[derive(Parser)]
#[command(name = "pkeep", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Host to bind (defaults to the configured bind address).
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (defaults to the configured bind address).
        #[arg(long, short)]
        port: Option<u16>,

        /// Export spans to stdout via OpenTelemetry.
        #[arg(long, env = "PROMPTKEEP_OTEL")]
        otel: bool,
    },

    /// Print the document stored under a key.
    Get {
        /// Storage key.
        key: String,
    },

    /// Store a document under a key (value is JSON).
    Set {
        /// Storage key.
        key: String,

        /// JSON value (string, number, object, array, boolean, null).
        value: String,
    },

    /// Inspect or clear prompt history.
    History {
        #[command(subcommand)]
        action: history::HistoryCommand,
    },

    /// Inspect favorites.
    #[command(alias = "fav")]
    Favorites {
        #[command(subcommand)]
        action: history::FavoritesCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Resolve the address for `serve`, overriding parts of the configured
/// `host:port` bind address.
pub fn bind_address(configured: &str, host: Option<String>, port: Option<u16>) -> String {
    let (default_host, default_port) = configured
        .rsplit_once(':')
        .unwrap_or((configured, "7861"));
    let host = host.unwrap_or_else(|| default_host.to_string());
    let port = port.map_or_else(|| default_port.to_string(), |p| p.to_string());
    format!("{host}:{port}")
}
