//! Key dispatch
//!
//! Maps a key to an [`Action`] from the current mode and focus alone. Nothing
//! here mutates state; the controller applies the action.

use tuish_keybinds::{Alias, AliasRegistry, Key, Keybind};

use crate::state::{Focus, ModeKind};

/// What a key press means in the current mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the selection of the focused panel by a signed step
    MoveSelection(isize),
    SwitchFocus,
    /// Enter: activate the selection, advance or submit the form, confirm
    Activate,
    /// Esc: leave the form or dialog
    Cancel,
    TextInput(char),
    DeleteBackward,
    /// A key bound to an alias, pressed while browsing
    RunAliasByKeybind(Alias),
    Noop,
}

/// Stateless key-to-action mapping
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyDispatcher;

impl KeyDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Decide what `key` means
    ///
    /// Keybinds are only consulted while browsing, so typing into a form
    /// never launches an alias.
    pub fn dispatch<S>(
        &self,
        mode: ModeKind,
        focus: Focus,
        key: Key,
        registry: &AliasRegistry<S>,
    ) -> Action {
        match mode {
            ModeKind::Browsing => Self::browsing(focus, key, registry),
            ModeKind::AddingAlias | ModeKind::EditingAlias => Self::form(key),
            ModeKind::ConfirmingRemoval => Self::confirmation(key),
            ModeKind::RunningProcess => Action::Noop,
        }
    }

    // Focus does not change the meaning of any key today; it is applied by
    // the controller when moving the selection.
    fn browsing<S>(_focus: Focus, key: Key, registry: &AliasRegistry<S>) -> Action {
        match key {
            Key::Up => Action::MoveSelection(-1),
            Key::Down => Action::MoveSelection(1),
            Key::Tab | Key::BackTab => Action::SwitchFocus,
            Key::Enter => Action::Activate,
            Key::Escape => Action::Cancel,
            Key::Char(c) => Keybind::new(c)
                .ok()
                .and_then(|kb| registry.resolve_by_keybind(kb))
                .map(|alias| Action::RunAliasByKeybind(alias.clone()))
                .unwrap_or(Action::Noop),
            _ => Action::Noop,
        }
    }

    fn form(key: Key) -> Action {
        match key {
            Key::Char(c) => Action::TextInput(c),
            Key::Backspace => Action::DeleteBackward,
            Key::Enter => Action::Activate,
            Key::Escape => Action::Cancel,
            _ => Action::Noop,
        }
    }

    fn confirmation(key: Key) -> Action {
        match key {
            Key::Char('y') | Key::Char('Y') | Key::Enter => Action::Activate,
            Key::Char('n') | Key::Char('N') | Key::Escape => Action::Cancel,
            _ => Action::Noop,
        }
    }
}
