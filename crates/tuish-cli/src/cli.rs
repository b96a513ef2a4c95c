// Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use tuish_config::FileConfigStore;

/// tuish - a menu of shell aliases, each one key away
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tuish")]
#[command(bin_name = "tuish")]
#[command(version)]
#[command(
    about = "A terminal menu of shell aliases",
    long_about = "A terminal menu of shell aliases.\n\n\
                  Browse, add, edit, and remove aliases, run one with its single-key\n\
                  keybind, or drop into the default shell. Aliases are stored in\n\
                  <config dir>/tuish/cnfg.json."
)]
pub struct Cli {
    /// Configuration file to use instead of the default
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs here instead of <config dir>/tuish/tuish.log
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Configuration file path after applying `--config`
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(FileConfigStore::default_path)
    }

    /// Log file path after applying `--log-file`
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| FileConfigStore::default_dir().join("tuish.log"))
    }
}
