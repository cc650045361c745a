//! CLI argument definitions using clap
//!
//! Commands:
//! - cardfile init --config <path>
//! - cardfile list
//! - cardfile search <query>
//! - cardfile show <id>
//! - cardfile add --name <name> --email <email>
//! - cardfile update <id> [--name <name>] [--email <email>]
//! - cardfile remove <id>
//!
//! Every command takes `--config` (default `./cardfile.json`) because
//! every invocation loads the store fresh from disk; no state survives
//! between commands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cardfile - a single-writer contact record store
#[derive(Parser, Debug)]
#[command(name = "cardfile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize an empty contact store
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./cardfile.json")]
        config: PathBuf,
    },

    /// List all contacts in insertion order
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./cardfile.json")]
        config: PathBuf,
    },

    /// List contacts whose name contains the query
    Search {
        /// Substring to match against contact names (case-sensitive)
        query: String,

        /// Path to configuration file
        #[arg(long, default_value = "./cardfile.json")]
        config: PathBuf,
    },

    /// Show a single contact by id
    Show {
        /// Contact id
        id: u64,

        /// Path to configuration file
        #[arg(long, default_value = "./cardfile.json")]
        config: PathBuf,
    },

    /// Validate and append a new contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Contact email
        #[arg(long)]
        email: String,

        /// Path to configuration file
        #[arg(long, default_value = "./cardfile.json")]
        config: PathBuf,
    },

    /// Edit an existing contact in place
    Update {
        /// Contact id
        id: u64,

        /// New name, if changing
        #[arg(long)]
        name: Option<String>,

        /// New email, if changing
        #[arg(long)]
        email: Option<String>,

        /// Path to configuration file
        #[arg(long, default_value = "./cardfile.json")]
        config: PathBuf,
    },

    /// Remove a contact by id
    Remove {
        /// Contact id
        id: u64,

        /// Path to configuration file
        #[arg(long, default_value = "./cardfile.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
