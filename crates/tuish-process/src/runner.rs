//! Foreground process runner

use std::process::{Child, ExitStatus};

use tracing::{debug, info, warn};

use crate::{
    error::{ProcessError, Result},
    request::RunRequest,
    signals::{self, InterruptShield},
    terminal::{SuspendGuard, TerminalControl},
};

/// Runs one child process at a time in the foreground
///
/// The call blocks for the whole lifetime of the child. There is no timeout:
/// the user ends the run by leaving the child.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create new process runner
    pub fn new() -> Self {
        Self
    }

    /// Hand the terminal to the child described by `request` and wait for it
    ///
    /// The terminal is suspended before spawning and resumed when this
    /// returns, on success, spawn failure, or signal termination alike. Alias
    /// runs show the exit summary and wait for a key before resuming.
    pub fn run<T: TerminalControl + ?Sized>(
        &self,
        terminal: &mut T,
        request: &RunRequest,
    ) -> Result<ExitStatus> {
        debug!(
            shell = %request.shell,
            args = ?request.args(),
            "Spawning process"
        );

        let mut guard = SuspendGuard::new(terminal).map_err(ProcessError::Terminal)?;
        // Ctrl-C belongs to the child; dropped before the guard resumes the UI
        let _shield = InterruptShield::new().map_err(ProcessError::Signals)?;

        let mut command = request.to_command();
        signals::restore_in_child(&mut command);
        let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
            program: request.shell.clone(),
            source,
        })?;
        let pid = child.id();
        info!(
            pid = %pid,
            shell = %request.shell,
            interactive = request.is_interactive(),
            "Process spawned"
        );

        let status = match child.wait() {
            Ok(status) => status,
            Err(e) => {
                warn!(pid = %pid, error = %e, "Wait failed, killing process");
                kill_and_reap(&mut child);
                return Err(ProcessError::Wait(e));
            }
        };
        info!(pid = %pid, status = %status, "Process exited");

        if request.pauses_after_exit() {
            let summary = format!("Command exited with: {}", exit_summary(&status));
            if let Err(e) = guard.terminal().pause(&summary) {
                warn!(error = %e, "Failed to show post-run prompt");
            }
        }

        Ok(status)
    }
}

/// Kill a child that can no longer be waited on normally, then collect it
fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        warn!(pid = %child.id(), error = %e, "Failed to kill process");
    }
    if let Err(e) = child.wait() {
        warn!(pid = %child.id(), error = %e, "Failed to reap process");
    }
}

/// Human-readable exit description, naming the signal when there is one
pub fn exit_summary(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit code {}", code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("terminated by signal {}", signal);
        }
    }

    status.to_string()
}
