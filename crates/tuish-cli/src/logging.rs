// File logging
//
// The TUI owns stdout and stderr while it runs, so every log line goes to a
// file instead.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

/// Environment variable holding an `EnvFilter` directive, e.g. `tuish_tui=trace`
pub const LOG_ENV: &str = "TUISH_LOG";

/// Initialize logging based on CLI flags
pub fn init_logging(path: &Path, verbose: bool) -> CliResult<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(env.as_deref(), verbose);
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(verbose)
        .with_file(verbose)
        .with_line_number(verbose)
        .try_init()
        .map_err(|e| CliError::Logging {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// `TUISH_LOG` wins when it parses; otherwise info, or debug with `--verbose`
pub fn build_filter(env: Option<&str>, verbose: bool) -> EnvFilter {
    env.and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

/// Open `path` for appending, creating its directory if needed
pub fn open_log_file(path: &Path) -> CliResult<File> {
    let open = || -> std::io::Result<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    };
    open().map_err(|e| CliError::Logging {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
