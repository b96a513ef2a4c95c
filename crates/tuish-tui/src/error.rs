//! Error types for the TUI

use thiserror::Error;

/// Errors that end the event loop
#[derive(Debug, Error)]
pub enum TuiError {
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for TUI operations
pub type TuiResult<T> = Result<T, TuiError>;
