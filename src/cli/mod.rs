//! Command-line interface, parsed with clap.

mod commands;

use clap::{Parser, Subcommand};

/// BounceBack - content service for exam papers, notes and lesson videos
#[derive(Parser)]
#[command(name = "bounceback")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Print collection counts from the configured store
    Stats {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

impl Cli {
    /// `init` must work even when the existing config file is broken.
    #[must_use]
    pub const fn requires_config(&self) -> bool {
        !matches!(self.command, Some(Commands::Init))
    }
}

pub use commands::*;
