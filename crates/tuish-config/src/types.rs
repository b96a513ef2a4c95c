//! Core configuration types and data structures

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Shell used on first run
#[cfg(windows)]
const DEFAULT_SHELL: &str = "cmd.exe";
#[cfg(not(windows))]
const DEFAULT_SHELL: &str = "/bin/bash";

/// Platform default shell path
pub fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

/// One alias as stored on disk; the alias name is the map key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasEntry {
    /// Command line handed to the shell verbatim
    pub command: String,
    /// Single-character keybind, `null` when unset
    #[serde(default)]
    pub keybind: Option<String>,
}

impl AliasEntry {
    pub fn new(command: impl Into<String>, keybind: Option<String>) -> Self {
        Self {
            command: command.into(),
            keybind,
        }
    }
}

/// Main application configuration
///
/// Alias order is the insertion order of the map and survives a save/load
/// cycle, which keeps index-based selection in the UI stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Configuration {
    /// Alias table keyed by alias name
    #[serde(default)]
    pub aliases: IndexMap<String, AliasEntry>,
    /// Shell used for alias commands and for "Go to shell"
    #[serde(rename = "default-shell")]
    pub default_shell: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            aliases: IndexMap::new(),
            default_shell: default_shell(),
        }
    }
}

impl Configuration {
    /// Create an empty configuration with the given shell
    pub fn with_shell(default_shell: impl Into<String>) -> Self {
        Self {
            aliases: IndexMap::new(),
            default_shell: default_shell.into(),
        }
    }

    /// Check the invariants of the file format
    pub fn validate(&self) -> Result<()> {
        if self.default_shell.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default-shell must not be empty".to_string(),
            ));
        }

        for (name, entry) in &self.aliases {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "alias names must not be empty".to_string(),
                ));
            }
            if let Some(keybind) = &entry.keybind {
                if !is_single_token(keybind) {
                    return Err(ConfigError::Validation(format!(
                        "keybind for alias '{}' must be a single character, got '{}'",
                        name, keybind
                    )));
                }
            }
        }

        Ok(())
    }
}

/// One printable character; whitespace and control characters can't be typed as a keybind
fn is_single_token(keybind: &str) -> bool {
    let mut chars = keybind.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if !c.is_whitespace() && !c.is_control()
    )
}
