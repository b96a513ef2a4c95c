//! tuish configuration storage
//!
//! Owns the on-disk representation of the alias table and the default shell:
//! - `Configuration` and `AliasEntry`, the serde model of `cnfg.json`
//! - `ConfigStore`, the load/save seam used by the alias registry
//! - `FileConfigStore`, an atomic (temp file + rename) JSON store
//! - `load_or_initialize`, the first-run bootstrap

pub mod error;
pub mod first_run;
pub mod store;
pub mod types;

pub use error::{ConfigError, Result};
pub use first_run::load_or_initialize;
pub use store::{ConfigStore, FileConfigStore};
pub use types::{default_shell, AliasEntry, Configuration};
