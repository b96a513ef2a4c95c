//! Property-based tests for configuration persistence

use proptest::prelude::*;
use tuish_config::{AliasEntry, ConfigStore, Configuration, FileConfigStore};

fn entry_strategy() -> impl Strategy<Value = AliasEntry> {
    (
        r"[a-z0-9 '|&-]{1,24}",
        proptest::option::of(proptest::char::range('a', 'z')),
    )
        .prop_map(|(command, keybind)| AliasEntry::new(command, keybind.map(String::from)))
}

fn config_strategy() -> impl Strategy<Value = Configuration> {
    (
        prop::collection::vec((r"[A-Za-z][A-Za-z0-9 _-]{0,15}", entry_strategy()), 0..8),
        r"/[a-z]{1,8}/[a-z]{1,8}",
    )
        .prop_map(|(aliases, shell)| {
            let mut config = Configuration::with_shell(shell);
            for (name, entry) in aliases {
                config.aliases.insert(name, entry);
            }
            config
        })
}

proptest! {
    /// Saving then loading yields the same alias set, order, and shell
    #[test]
    fn prop_save_load_round_trip(config in config_strategy()) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(temp_dir.path().join("cnfg.json"));

        store.save(&config).unwrap();
        let loaded = store.load().unwrap();

        prop_assert_eq!(&loaded, &config);
        prop_assert!(loaded.aliases.keys().eq(config.aliases.keys()));
    }
}
