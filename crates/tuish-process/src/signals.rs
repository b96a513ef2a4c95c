//! Keyboard signals while a child owns the terminal
//!
//! The launcher stays in the terminal's foreground process group while a child
//! runs, so Ctrl-C and Ctrl-\ reach both processes. [`InterruptShield`] ignores
//! SIGINT and SIGQUIT here for as long as any child runs, and
//! [`restore_in_child`] hands the child default dispositions before exec,
//! mirroring `system(3)`.

use std::io;
use std::process::Command;

#[cfg(unix)]
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(unix)]
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
#[cfg(unix)]
use tracing::{debug, warn};

#[cfg(unix)]
const KEYBOARD_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];

/// Dispositions replaced by the outermost shield, and how many shields are live
#[cfg(unix)]
struct Shielded {
    live: usize,
    previous: Vec<(Signal, SigAction)>,
}

#[cfg(unix)]
static SHIELDED: Mutex<Shielded> = Mutex::new(Shielded {
    live: 0,
    previous: Vec::new(),
});

#[cfg(unix)]
fn shielded() -> MutexGuard<'static, Shielded> {
    SHIELDED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps keyboard signals ignored in this process until dropped
///
/// Dispositions are process-wide, so shields are counted and only the last
/// one to drop puts the previous handlers back.
#[must_use]
pub struct InterruptShield {
    _private: (),
}

impl InterruptShield {
    #[cfg(unix)]
    pub fn new() -> io::Result<Self> {
        let mut state = shielded();
        if state.live == 0 {
            let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
            let mut previous = Vec::with_capacity(KEYBOARD_SIGNALS.len());
            for signal in KEYBOARD_SIGNALS {
                // SAFETY: SIG_IGN runs no handler code
                match unsafe { sigaction(signal, &ignore) } {
                    Ok(old) => previous.push((signal, old)),
                    Err(errno) => {
                        reinstall(&previous);
                        return Err(errno.into());
                    }
                }
            }
            state.previous = previous;
            debug!("Keyboard signals ignored while a child runs");
        }
        state.live += 1;
        Ok(Self { _private: () })
    }

    #[cfg(not(unix))]
    pub fn new() -> io::Result<Self> {
        Ok(Self { _private: () })
    }
}

#[cfg(unix)]
impl Drop for InterruptShield {
    fn drop(&mut self) {
        let mut state = shielded();
        state.live = state.live.saturating_sub(1);
        if state.live == 0 {
            let previous = std::mem::take(&mut state.previous);
            reinstall(&previous);
            debug!("Keyboard signal handling restored");
        }
    }
}

#[cfg(unix)]
fn reinstall(previous: &[(Signal, SigAction)]) {
    for (signal, action) in previous {
        // SAFETY: puts back a disposition this process already had
        if let Err(e) = unsafe { sigaction(*signal, action) } {
            warn!(signal = %signal, error = %e, "Failed to restore signal disposition");
        }
    }
}

/// Give the child default keyboard-signal dispositions before it execs
#[cfg(unix)]
pub fn restore_in_child(command: &mut Command) {
    use std::os::unix::process::CommandExt;

    // SAFETY: the hook only calls sigaction, which is async-signal-safe, and
    // does not allocate
    unsafe {
        command.pre_exec(|| {
            let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
            for signal in KEYBOARD_SIGNALS {
                sigaction(signal, &default)?;
            }
            Ok(())
        });
    }
}

#[cfg(not(unix))]
pub fn restore_in_child(_command: &mut Command) {}

#[cfg(all(test, unix))]
mod tests {
    use nix::sys::signal::raise;

    use super::*;

    #[test]
    fn test_interrupt_is_ignored_while_shielded() {
        let shield = InterruptShield::new().unwrap();
        raise(Signal::SIGINT).unwrap();
        raise(Signal::SIGQUIT).unwrap();
        drop(shield);
    }

    #[test]
    fn test_nested_shields_keep_signals_ignored() {
        let outer = InterruptShield::new().unwrap();
        let inner = InterruptShield::new().unwrap();
        drop(inner);

        raise(Signal::SIGINT).unwrap();
        drop(outer);
    }
}
