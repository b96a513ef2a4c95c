//! Event loop
//!
//! Single-threaded: draw, block on the next key, apply it, and perform any
//! resulting effect. While a child runs the loop is blocked inside the
//! process runner, so no key is read or dispatched until the UI is back.

use std::io;

use ratatui::Frame;
use tracing::info;
use tuish_config::ConfigStore;
use tuish_keybinds::{AliasRegistry, Key};
use tuish_process::{ProcessRunner, TerminalControl};

use crate::{
    error::TuiResult,
    session::{Effect, SessionController},
    view,
};

/// Terminal as seen by the event loop: a drawing surface and a key source
/// that can also be handed to a child process
pub trait UiTerminal: TerminalControl {
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()>;

    fn clear(&mut self) -> io::Result<()>;

    /// Next key press; `None` for events that only need a redraw
    fn read_key(&mut self) -> io::Result<Option<Key>>;
}

/// The application: session controller plus the process runner
pub struct App<S> {
    session: SessionController<S>,
    runner: ProcessRunner,
}

impl<S: ConfigStore> App<S> {
    pub fn new(registry: AliasRegistry<S>) -> Self {
        Self {
            session: SessionController::new(registry),
            runner: ProcessRunner::new(),
        }
    }

    /// Run until the user quits
    pub fn run<T: UiTerminal>(&mut self, terminal: &mut T) -> TuiResult<()> {
        info!(aliases = self.session.registry().len(), "Session started");

        loop {
            let session = &self.session;
            terminal.draw(&mut |frame: &mut Frame| view::render(frame, session))?;

            let Some(key) = terminal.read_key()? else {
                continue;
            };

            match self.session.handle_key(key) {
                Some(Effect::Run(request)) => {
                    let result = self.runner.run(terminal, &request);
                    self.session.finish_run(result);
                    // The child drew over the screen; force a full repaint
                    terminal.clear()?;
                }
                Some(Effect::Exit) => break,
                None => {}
            }
        }

        info!("Session ended");
        Ok(())
    }

    pub fn session(&self) -> &SessionController<S> {
        &self.session
    }

    pub fn into_session(self) -> SessionController<S> {
        self.session
    }
}
