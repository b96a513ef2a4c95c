//! Shared fixtures for the end-to-end scenarios

use std::collections::VecDeque;
use std::io;

use ratatui::{backend::TestBackend, Frame, Terminal};
use tuish_keybinds::Key;
use tuish_process::TerminalControl;
use tuish_tui::UiTerminal;

/// Replays a fixed key script and records terminal hand-overs
pub struct ScriptedTerminal {
    terminal: Terminal<TestBackend>,
    keys: VecDeque<Key>,
    pub calls: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            terminal: Terminal::new(TestBackend::new(80, 24)).unwrap(),
            keys: keys.into_iter().collect(),
            calls: Vec::new(),
        }
    }

    /// Text of the last drawn frame, one string per row
    pub fn screen(&self) -> Vec<String> {
        let buffer = self.terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }
}

impl UiTerminal for ScriptedTerminal {
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame))?;
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.calls.push("clear".into());
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Option<Key>> {
        self.keys
            .pop_front()
            .map(Some)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

impl TerminalControl for ScriptedTerminal {
    fn suspend(&mut self) -> io::Result<()> {
        self.calls.push("suspend".into());
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        self.calls.push("resume".into());
        Ok(())
    }

    fn pause(&mut self, summary: &str) -> io::Result<()> {
        self.calls.push(format!("pause: {}", summary));
        Ok(())
    }
}

/// Keys typing `text` into a form field
pub fn typed(text: &str) -> Vec<Key> {
    text.chars().map(Key::Char).collect()
}

/// From the initial state: move to "Quit shell" and press Enter
pub fn quit_from_top() -> Vec<Key> {
    vec![Key::Down, Key::Down, Key::Down, Key::Down, Key::Enter]
}
