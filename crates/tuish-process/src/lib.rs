//! # tuish-process
//!
//! **Purpose**: Run one foreground child process that owns the terminal
//!
//! Provides the process-execution contract of the launcher: an alias command
//! runs as `shell -c <command>`, "Go to shell" launches the shell itself, and in
//! both cases the UI's terminal mode is released for the lifetime of the child
//! and restored afterwards, whatever way the child ends.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tuish_process::{ProcessRunner, RunRequest, TerminalControl};
//!
//! # fn demo(terminal: &mut impl TerminalControl) -> Result<(), Box<dyn std::error::Error>> {
//! let runner = ProcessRunner::new();
//! let status = runner.run(terminal, &RunRequest::alias("/bin/bash", "ls -la"))?;
//! println!("{}", status);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod request;
pub mod runner;
mod signals;
pub mod terminal;

pub use error::{ProcessError, Result};
pub use request::RunRequest;
pub use runner::{exit_summary, ProcessRunner};
pub use terminal::{SuspendGuard, TerminalControl};
