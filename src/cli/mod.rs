//! CLI shell for the contact store
//!
//! The shell is deliberately thin: it translates one invocation into
//! one store operation (load, at most one mutation, optional save) and
//! renders the result. All record-store semantics live in `contact` and
//! `store`; this module only sequences them.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{add, init, list, remove, run, run_command, search, show, update, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
