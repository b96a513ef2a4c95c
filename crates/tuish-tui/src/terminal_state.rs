//! Terminal state management
//!
//! [`TerminalSession`] puts the terminal into raw mode on the alternate screen
//! for the lifetime of the UI and restores it on drop, so a normal exit, an
//! error return, and a panic unwinding through `main` all leave the user's
//! terminal usable. It also implements [`TerminalControl`] so the process
//! runner can hand the terminal to a child and take it back.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tuish_keybinds::Key;
use tuish_process::TerminalControl;

use crate::{app::UiTerminal, bridge};

/// Terminal modes currently switched on by this session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Modes {
    raw: bool,
    alternate_screen: bool,
}

impl Modes {
    /// Switch modes on in order; each is recorded as soon as it is on
    fn enter(
        &mut self,
        enter_raw: impl FnOnce() -> io::Result<()>,
        enter_screen: impl FnOnce() -> io::Result<()>,
    ) -> io::Result<()> {
        if !self.raw {
            enter_raw()?;
            self.raw = true;
        }
        if !self.alternate_screen {
            enter_screen()?;
            self.alternate_screen = true;
        }
        Ok(())
    }

    /// Switch off whatever is on; both steps run even if the first fails
    fn leave(
        &mut self,
        leave_screen: impl FnOnce() -> io::Result<()>,
        leave_raw: impl FnOnce() -> io::Result<()>,
    ) -> io::Result<()> {
        let mut result = Ok(());
        if self.alternate_screen {
            self.alternate_screen = false;
            result = leave_screen();
        }
        if self.raw {
            self.raw = false;
            result = result.and(leave_raw());
        }
        result
    }
}

/// The real terminal, owned by the UI while it runs
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    modes: Modes,
}

impl TerminalSession {
    /// Capture the terminal: raw mode, alternate screen, hidden cursor
    pub fn capture() -> io::Result<Self> {
        let mut session = Self {
            terminal: Terminal::new(CrosstermBackend::new(io::stdout()))?,
            modes: Modes::default(),
        };
        // A partial capture is undone by drop
        session.enter()?;
        session.terminal.clear()?;

        tracing::info!("Terminal state captured: raw_mode=true, alternate_screen=true");
        Ok(session)
    }

    /// Put the terminal back the way the shell had it; safe to call twice
    pub fn restore(&mut self) -> io::Result<()> {
        if self.modes == Modes::default() {
            return Ok(());
        }
        self.leave()?;

        tracing::info!("Terminal state restored");
        Ok(())
    }

    fn enter(&mut self) -> io::Result<()> {
        let terminal = &mut self.terminal;
        self.modes.enter(enable_raw_mode, || {
            execute!(terminal.backend_mut(), EnterAlternateScreen, cursor::Hide)
        })
    }

    fn leave(&mut self) -> io::Result<()> {
        let terminal = &mut self.terminal;
        self.modes.leave(
            || execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show),
            disable_raw_mode,
        )
    }
}

impl UiTerminal for TerminalSession {
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame))?;
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }

    /// Block for the next event; a resize or an unmapped key yields `None`
    fn read_key(&mut self) -> io::Result<Option<Key>> {
        match event::read()? {
            event::Event::Key(key_event) => Ok(bridge::to_key(key_event)),
            event::Event::Resize(width, height) => {
                // The next draw picks up the new size
                tracing::debug!("Terminal resized to {}x{}", width, height);
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

impl TerminalControl for TerminalSession {
    fn suspend(&mut self) -> io::Result<()> {
        self.leave()
    }

    fn resume(&mut self) -> io::Result<()> {
        self.enter()
    }

    fn pause(&mut self, summary: &str) -> io::Result<()> {
        let backend = self.terminal.backend_mut();
        writeln!(backend, "\n{}", summary)?;
        writeln!(backend, "Press any key to return to the menu...")?;
        backend.flush()?;

        enable_raw_mode()?;
        self.modes.raw = true;
        let waited = wait_for_key_press();
        disable_raw_mode()?;
        self.modes.raw = false;
        waited
    }
}

impl Drop for TerminalSession {
    /// Ensure terminal is restored even if restore() wasn't called explicitly
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::error!("Failed to restore terminal state on drop: {}", e);
        }
    }
}

fn wait_for_key_press() -> io::Result<()> {
    loop {
        if let event::Event::Key(key_event) = event::read()? {
            if key_event.kind == event::KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
