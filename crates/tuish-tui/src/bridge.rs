//! Bridge between crossterm key events and tuish-keybinds
//!
//! Converts crossterm::event::KeyEvent to tuish_keybinds::Key

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tuish_keybinds::Key;

/// Convert a crossterm KeyEvent to a tuish-keybinds Key
///
/// Releases and repeats are dropped, as are chords with Ctrl or Alt: no
/// binding in the menu uses them, and a Ctrl+letter must not fire the alias
/// bound to that letter.
pub fn to_key(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab if event.modifiers.contains(KeyModifiers::SHIFT) => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => return None, // Unsupported key
    };

    Some(key)
}
