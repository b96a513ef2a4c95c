//! Terminal hand-over around a child process
//!
//! The UI runs in raw mode on the alternate screen. A child process needs the
//! normal screen in cooked mode, and the UI needs its mode back as soon as the
//! child is gone. [`SuspendGuard`] ties the restoration to scope exit so every
//! return path (spawn failure, non-zero exit, signal) goes through it.

use std::io;

use tracing::{debug, error};

/// Terminal mode switching provided by the UI layer
pub trait TerminalControl {
    /// Release the terminal: leave raw mode and the alternate screen
    fn suspend(&mut self) -> io::Result<()>;

    /// Take the terminal back: raw mode, alternate screen, full redraw
    fn resume(&mut self) -> io::Result<()>;

    /// Show `summary` on the released terminal and block until a key is pressed
    fn pause(&mut self, summary: &str) -> io::Result<()>;
}

impl<T: TerminalControl + ?Sized> TerminalControl for &mut T {
    fn suspend(&mut self) -> io::Result<()> {
        (**self).suspend()
    }

    fn resume(&mut self) -> io::Result<()> {
        (**self).resume()
    }

    fn pause(&mut self, summary: &str) -> io::Result<()> {
        (**self).pause(summary)
    }
}

/// Keeps the terminal suspended until dropped
pub struct SuspendGuard<'a, T: TerminalControl + ?Sized> {
    terminal: &'a mut T,
}

impl<'a, T: TerminalControl + ?Sized> SuspendGuard<'a, T> {
    /// Suspend the terminal; on failure the UI mode is restored before returning
    pub fn new(terminal: &'a mut T) -> io::Result<Self> {
        if let Err(e) = terminal.suspend() {
            if let Err(restore) = terminal.resume() {
                error!("Failed to restore terminal after failed suspend: {}", restore);
            }
            return Err(e);
        }
        debug!("Terminal suspended for child process");
        Ok(Self { terminal })
    }

    /// The suspended terminal, e.g. to show a prompt on it
    pub fn terminal(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: TerminalControl + ?Sized> Drop for SuspendGuard<'_, T> {
    /// Ensure the UI mode is restored even on early return
    fn drop(&mut self) {
        match self.terminal.resume() {
            Ok(()) => debug!("Terminal resumed"),
            Err(e) => error!("Failed to resume terminal: {}", e),
        }
    }
}
