//! What to run in the foreground

use std::process::Command;

/// A foreground run: an alias command through the shell, or the shell itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Shell executable
    pub shell: String,
    /// Command line for `shell -c`; `None` launches an interactive shell
    pub command: Option<String>,
}

impl RunRequest {
    /// Build a request from the `(commandLine, shellPath, interactive)` triple
    pub fn new(
        command_line: impl Into<String>,
        shell: impl Into<String>,
        interactive: bool,
    ) -> Self {
        if interactive {
            Self::interactive(shell)
        } else {
            Self::alias(shell, command_line)
        }
    }

    /// Run `command` through `shell`
    pub fn alias(shell: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            command: Some(command.into()),
        }
    }

    /// Launch `shell` with no command
    pub fn interactive(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            command: None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    /// Alias runs stop on a "press any key" prompt before the UI comes back
    pub fn pauses_after_exit(&self) -> bool {
        !self.is_interactive()
    }

    /// Arguments passed to the shell
    pub fn args(&self) -> Vec<&str> {
        match &self.command {
            Some(command) => vec![command_flag(&self.shell), command.as_str()],
            None => Vec::new(),
        }
    }

    /// Build the child command; stdio is inherited so the child owns the terminal
    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.args(self.args());
        cmd
    }
}

/// `cmd.exe` takes `/C`, every POSIX-style shell takes `-c`
fn command_flag(shell: &str) -> &'static str {
    let file_name = shell
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(shell);
    let stem = file_name.split('.').next().unwrap_or(file_name);
    if stem.eq_ignore_ascii_case("cmd") {
        "/C"
    } else {
        "-c"
    }
}
