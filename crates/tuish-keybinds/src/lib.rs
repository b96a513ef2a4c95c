//! Aliases and keybinds for tuish
//!
//! This crate provides:
//! - The `Key` model the UI dispatches on
//! - `Keybind`, the single-character shortcut an alias may claim
//! - `AliasRegistry`, the ordered alias table that enforces unique names and
//!   unique keybinds and persists every mutation through a `ConfigStore`

pub mod error;
pub mod models;
pub mod registry;

pub use error::{RegistryError, Result};
pub use models::{Alias, Key, Keybind};
pub use registry::{AliasRegistry, Committed};
