//! Persistence of the configuration file
//!
//! # Storage Location
//!
//! The configuration lives at `<config dir>/tuish/cnfg.json`, where the
//! config dir comes from [`dirs::config_dir`] (`~/.config` on Linux).
//!
//! # File Format
//!
//! ```json
//! {
//!   "aliases": {
//!     "Example Shell": { "command": "echo 'hi'", "keybind": "e" }
//!   },
//!   "default-shell": "/bin/bash"
//! }
//! ```
//!
//! Saves go through a temporary file in the same directory that is renamed
//! over the target, so a failed write leaves the previous file untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::types::Configuration;

/// Directory name under the platform config dir
const APP_DIR: &str = "tuish";
/// Configuration file name
const CONFIG_FILE: &str = "cnfg.json";

/// Load/save seam for the configuration
pub trait ConfigStore {
    /// Load the configuration; `ConfigError::NotFound` on first run
    fn load(&self) -> Result<Configuration>;

    /// Persist the configuration, replacing the previous one atomically
    fn save(&self, config: &Configuration) -> Result<()>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn load(&self) -> Result<Configuration> {
        (**self).load()
    }

    fn save(&self, config: &Configuration) -> Result<()> {
        (**self).save(config)
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for Box<S> {
    fn load(&self) -> Result<Configuration> {
        (**self).load()
    }

    fn save(&self, config: &Configuration) -> Result<()> {
        (**self).save(config)
    }
}

/// JSON file backed store
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Create a store for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        Self::default_dir().join(CONFIG_FILE)
    }

    /// Per-user tuish directory, holding the config file and the log
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// Path of the configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Configuration> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config: Configuration = serde_json::from_str(&content).map_err(|e| {
            ConfigError::Parse(format!("{}: {}", self.path.display(), e))
        })?;
        config.validate()?;

        debug!(
            path = %self.path.display(),
            aliases = config.aliases.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    fn save(&self, config: &Configuration) -> Result<()> {
        config.validate()?;

        let mut json = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;
        json.push('\n');

        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| ConfigError::Io(e.error))?;

        info!(
            path = %self.path.display(),
            aliases = config.aliases.len(),
            "Configuration saved"
        );
        Ok(())
    }
}
