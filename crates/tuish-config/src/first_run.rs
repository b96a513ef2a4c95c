//! First-run bootstrap
//!
//! A missing configuration file is not an error: it means this is the first
//! run, and a default configuration is written before the session starts.

use tracing::info;

use crate::error::{ConfigError, Result};
use crate::store::ConfigStore;
use crate::types::Configuration;

/// Load the configuration, creating and persisting the default on first run
pub fn load_or_initialize<S: ConfigStore + ?Sized>(store: &S) -> Result<Configuration> {
    match store.load() {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(path)) => {
            let config = Configuration::default();
            store.save(&config)?;
            info!(
                path = %path.display(),
                shell = %config.default_shell,
                "Created default configuration"
            );
            Ok(config)
        }
        Err(e) => Err(e),
    }
}
