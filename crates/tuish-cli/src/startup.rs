// Startup sequence

use tracing::info;
use tuish_config::{load_or_initialize, ConfigStore, FileConfigStore};
use tuish_keybinds::AliasRegistry;
use tuish_tui::{App, TerminalSession};

use crate::{cli::Cli, error::CliResult};

/// Load the configuration, take over the terminal, and run until the user quits
///
/// Configuration problems are reported before the terminal is touched. Once
/// captured, the terminal is restored on every exit path, including a panic
/// unwinding out of the event loop.
pub fn run(cli: &Cli) -> CliResult<()> {
    let store = FileConfigStore::new(cli.config_path());
    info!(path = %store.path().display(), "Using configuration file");
    let registry = open_registry(store)?;

    let mut terminal = TerminalSession::capture()?;
    let mut app = App::new(registry);
    let result = app.run(&mut terminal);

    let restored = terminal.restore();
    result?;
    restored?;
    Ok(())
}

/// Build the alias registry over `store`, writing the default configuration on first run
pub fn open_registry<S: ConfigStore>(store: S) -> CliResult<AliasRegistry<S>> {
    let config = load_or_initialize(&store)?;
    info!(
        aliases = config.aliases.len(),
        shell = %config.default_shell,
        "Configuration loaded"
    );
    Ok(AliasRegistry::new(config, store))
}
