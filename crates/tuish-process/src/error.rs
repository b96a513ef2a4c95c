//! Error types for process execution

use std::io;
use thiserror::Error;

/// Process execution errors
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The shell could not be started (missing or not executable)
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Waiting on the child failed
    #[error("Failed to wait for process: {0}")]
    Wait(#[source] io::Error),

    /// Keyboard signals could not be redirected to the child
    #[error("Failed to set up signal handling: {0}")]
    Signals(#[source] io::Error),

    /// Handing the terminal to the child failed
    #[error("Failed to switch terminal mode: {0}")]
    Terminal(#[source] io::Error),
}

/// Result type for process operations
pub type Result<T> = std::result::Result<T, ProcessError>;
