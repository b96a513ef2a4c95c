// Startup and session errors

use std::path::PathBuf;

use thiserror::Error;
use tuish_config::ConfigError;
use tuish_tui::TuiError;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Session error: {0}")]
    Tui(#[from] TuiError),

    #[error("Failed to set up logging to {path}: {message}")]
    Logging { path: PathBuf, message: String },
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::Config(ConfigError::Parse(msg)) => {
                format!(
                    "The configuration file is not valid JSON: {}\n\n\
                     Fix or remove the file and start tuish again.",
                    msg
                )
            }
            CliError::Config(ConfigError::Validation(msg)) => {
                format!(
                    "The configuration file has an invalid entry: {}\n\n\
                     Fix the entry and start tuish again.",
                    msg
                )
            }
            CliError::Config(e) => format!("Configuration error: {}", e),
            CliError::Terminal(e) => {
                format!(
                    "Could not set up the terminal: {}\n\ntuish needs an interactive terminal.",
                    e
                )
            }
            CliError::Tui(e) => format!("The session ended unexpectedly: {}", e),
            CliError::Logging { path, message } => {
                format!("Could not open log file {}: {}", path.display(), message)
            }
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_parse_error() {
        let err = CliError::from(ConfigError::Parse("expected value at line 1".into()));
        let msg = err.user_message();
        assert!(msg.contains("not valid JSON"));
        assert!(msg.contains("expected value at line 1"));
    }

    #[test]
    fn test_user_message_for_terminal_error() {
        let err = CliError::from(std::io::Error::new(std::io::ErrorKind::Other, "not a tty"));
        assert!(err.user_message().contains("interactive terminal"));
    }
}
