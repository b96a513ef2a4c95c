//! Alias registry with fast keybind lookup
//!
//! The registry is the only writer of the configuration. Every successful
//! `add`, `edit`, or `remove` is followed by a synchronous save through the
//! [`ConfigStore`]. A failed save does not roll the mutation back; the error is
//! handed to the caller inside [`Committed`] so it can be shown as a banner.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, info, warn};
use tuish_config::{AliasEntry, ConfigError, ConfigStore, Configuration};

use crate::{
    error::{RegistryError, Result},
    models::{Alias, Keybind},
};

/// Result of a mutation that was applied in memory
#[derive(Debug)]
pub struct Committed<T> {
    /// The alias as it was inserted, updated, or removed
    pub value: T,
    /// Set when writing the configuration failed
    pub save_error: Option<ConfigError>,
}

impl<T> Committed<T> {
    /// Whether the mutation also reached the store
    pub fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Registry for storing and looking up aliases
#[derive(Debug)]
pub struct AliasRegistry<S> {
    /// Map from alias name to alias, in insertion order
    by_name: IndexMap<String, Alias>,
    /// Map from keybind to the name of the alias that claims it
    by_keybind: HashMap<Keybind, String>,
    default_shell: String,
    store: S,
}

impl<S: ConfigStore> AliasRegistry<S> {
    /// Build a registry from a loaded configuration
    ///
    /// Keybinds that fail to parse, or that an earlier alias already claims,
    /// are dropped with a warning so the uniqueness invariant holds from the
    /// start even for hand-edited files.
    pub fn new(config: Configuration, store: S) -> Self {
        let mut by_name = IndexMap::with_capacity(config.aliases.len());
        let mut by_keybind = HashMap::new();

        for (name, entry) in config.aliases {
            let keybind = match entry.keybind.as_deref().map(str::parse::<Keybind>) {
                None => None,
                Some(Ok(kb)) if by_keybind.contains_key(&kb) => {
                    warn!(alias = %name, keybind = %kb, "Dropping duplicate keybind");
                    None
                }
                Some(Ok(kb)) => Some(kb),
                Some(Err(e)) => {
                    warn!(alias = %name, error = %e, "Dropping invalid keybind");
                    None
                }
            };

            if let Some(kb) = keybind {
                by_keybind.insert(kb, name.clone());
            }
            by_name.insert(name.clone(), Alias::new(name, entry.command, keybind));
        }

        debug!(aliases = by_name.len(), "Alias registry initialized");

        AliasRegistry {
            by_name,
            by_keybind,
            default_shell: config.default_shell,
            store,
        }
    }

    /// Add a new alias and persist
    pub fn add(
        &mut self,
        name: &str,
        command: &str,
        keybind: Option<Keybind>,
    ) -> Result<Committed<Alias>> {
        validate_name(name)?;
        validate_command(command)?;
        if self.by_name.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        self.check_keybind_free(keybind, None)?;

        let alias = Alias::new(name, command, keybind);
        if let Some(kb) = keybind {
            self.by_keybind.insert(kb, alias.name.clone());
        }
        self.by_name.insert(alias.name.clone(), alias.clone());

        info!(alias = %alias.name, keybind = ?keybind, "Alias added");
        Ok(self.persist(alias))
    }

    /// Replace the command and keybind of an existing alias and persist
    pub fn edit(
        &mut self,
        name: &str,
        new_command: &str,
        new_keybind: Option<Keybind>,
    ) -> Result<Committed<Alias>> {
        validate_command(new_command)?;
        let old_keybind = match self.by_name.get(name) {
            Some(alias) => alias.keybind,
            None => return Err(RegistryError::NotFound(name.to_string())),
        };
        self.check_keybind_free(new_keybind, Some(name))?;

        if let Some(kb) = old_keybind {
            self.by_keybind.remove(&kb);
        }
        if let Some(kb) = new_keybind {
            self.by_keybind.insert(kb, name.to_string());
        }

        let alias = match self.by_name.get_mut(name) {
            Some(alias) => {
                alias.command = new_command.to_string();
                alias.keybind = new_keybind;
                alias.clone()
            }
            None => return Err(RegistryError::NotFound(name.to_string())),
        };

        info!(alias = %name, keybind = ?new_keybind, "Alias edited");
        Ok(self.persist(alias))
    }

    /// Remove an alias and persist
    pub fn remove(&mut self, name: &str) -> Result<Committed<Alias>> {
        let alias = self
            .by_name
            .shift_remove(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        if let Some(kb) = alias.keybind {
            self.by_keybind.remove(&kb);
        }

        info!(alias = %name, "Alias removed");
        Ok(self.persist(alias))
    }

    /// Write the current state to the store, e.g. to retry a failed save
    pub fn save(&self) -> std::result::Result<(), ConfigError> {
        self.store.save(&self.to_configuration())
    }

    fn persist<T>(&self, value: T) -> Committed<T> {
        let save_error = match self.save() {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Failed to persist aliases; keeping in-memory change");
                Some(e)
            }
        };
        Committed { value, save_error }
    }

    fn check_keybind_free(&self, keybind: Option<Keybind>, editing: Option<&str>) -> Result<()> {
        let Some(kb) = keybind else {
            return Ok(());
        };
        match self.by_keybind.get(&kb) {
            Some(owner) if Some(owner.as_str()) != editing => Err(RegistryError::KeybindInUse {
                keybind: kb,
                owner: owner.clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl<S> AliasRegistry<S> {
    /// Look up the alias bound to a keybind
    pub fn resolve_by_keybind(&self, keybind: Keybind) -> Option<&Alias> {
        self.by_keybind
            .get(&keybind)
            .and_then(|name| self.by_name.get(name))
    }

    /// Look up an alias by name
    pub fn get(&self, name: &str) -> Option<&Alias> {
        self.by_name.get(name)
    }

    /// Alias at a position of `list()`
    pub fn get_index(&self, index: usize) -> Option<&Alias> {
        self.by_name.get_index(index).map(|(_, alias)| alias)
    }

    /// Position of an alias in `list()`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get_index_of(name)
    }

    /// All aliases in insertion order
    pub fn list(&self) -> impl ExactSizeIterator<Item = &Alias> + '_ {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Shell used for alias commands and interactive sessions
    pub fn default_shell(&self) -> &str {
        &self.default_shell
    }

    /// Snapshot in the on-disk representation
    pub fn to_configuration(&self) -> Configuration {
        let aliases = self
            .by_name
            .values()
            .map(|alias| {
                (
                    alias.name.clone(),
                    AliasEntry::new(
                        alias.command.clone(),
                        alias.keybind.map(|kb| kb.to_string()),
                    ),
                )
            })
            .collect();

        Configuration {
            aliases,
            default_shell: self.default_shell.clone(),
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RegistryError::InvalidName(
            "Alias name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_command(command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Err(RegistryError::EmptyCommand);
    }
    Ok(())
}
