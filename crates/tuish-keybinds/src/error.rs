//! Error types for alias registry operations

use thiserror::Error;

use crate::models::Keybind;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur in the alias registry
///
/// All of these are validation failures raised before any mutation happens.
/// Persistence failures after a mutation are reported through
/// [`Committed::save_error`](crate::Committed) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("An alias named '{0}' already exists")]
    DuplicateName(String),

    #[error("Keybind '{keybind}' is already used by '{owner}'")]
    KeybindInUse { keybind: Keybind, owner: String },

    #[error("Alias not found: {0}")]
    NotFound(String),

    #[error("Invalid alias name: {0}")]
    InvalidName(String),

    #[error("Command must not be empty")]
    EmptyCommand,

    #[error("Invalid keybind: {0}")]
    InvalidKeybind(String),
}
