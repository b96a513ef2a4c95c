//! tuish command-line entry
//!
//! Argument parsing, file logging, and the startup sequence that wires the
//! configuration store, the alias registry, and the terminal UI together.

pub mod cli;
pub mod error;
pub mod logging;
pub mod startup;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use startup::run;
