//! Core data models for aliases and keys

use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// Represents a key on the keyboard, as delivered by the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Esc"),
            Key::Tab => write!(f, "Tab"),
            Key::BackTab => write!(f, "Shift+Tab"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
        }
    }
}

/// A single-character shortcut claimed by at most one alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keybind(char);

impl Keybind {
    /// Create a keybind from a character; whitespace and control characters are rejected
    pub fn new(c: char) -> Result<Self, RegistryError> {
        if c.is_whitespace() || c.is_control() {
            return Err(RegistryError::InvalidKeybind(format!("{:?}", c)));
        }
        Ok(Keybind(c))
    }

    /// Parse form or file input; empty input means "no keybind"
    pub fn parse_optional(input: &str) -> Result<Option<Self>, RegistryError> {
        if input.is_empty() {
            return Ok(None);
        }
        input.parse().map(Some)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// Whether a pressed key triggers this keybind
    pub fn matches(self, key: Key) -> bool {
        key == Key::Char(self.0)
    }
}

impl fmt::Display for Keybind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Keybind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Keybind::new(c),
            _ => Err(RegistryError::InvalidKeybind(format!(
                "expected a single character, got '{}'",
                s
            ))),
        }
    }
}

/// A named shell-command shortcut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub command: String,
    pub keybind: Option<Keybind>,
}

impl Alias {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        keybind: Option<Keybind>,
    ) -> Self {
        Alias {
            name: name.into(),
            command: command.into(),
            keybind,
        }
    }

    /// Row text for the aliases panel: `name [k] - command`
    pub fn display_line(&self) -> String {
        match self.keybind {
            Some(kb) => format!("{} [{}] - {}", self.name, kb, self.command),
            None => format!("{} - {}", self.name, self.command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keybind_parse() {
        assert_eq!("x".parse::<Keybind>().unwrap().as_char(), 'x');
        assert_eq!("Ö".parse::<Keybind>().unwrap().as_char(), 'Ö');
        assert!("".parse::<Keybind>().is_err());
        assert!("xy".parse::<Keybind>().is_err());
        assert!(" ".parse::<Keybind>().is_err());
        assert!("\t".parse::<Keybind>().is_err());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(Keybind::parse_optional("").unwrap(), None);
        assert_eq!(
            Keybind::parse_optional("k").unwrap(),
            Some(Keybind::new('k').unwrap())
        );
        assert!(Keybind::parse_optional("kk").is_err());
    }

    #[test]
    fn test_keybind_matches_only_its_char() {
        let kb = Keybind::new('g').unwrap();
        assert!(kb.matches(Key::Char('g')));
        assert!(!kb.matches(Key::Char('G')));
        assert!(!kb.matches(Key::Enter));
    }

    #[test]
    fn test_display_line() {
        let with_kb = Alias::new("build", "make", Some(Keybind::new('b').unwrap()));
        assert_eq!(with_kb.display_line(), "build [b] - make");

        let without = Alias::new("list", "ls -la", None);
        assert_eq!(without.display_line(), "list - ls -la");
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::Char('q').to_string(), "q");
        assert_eq!(Key::Escape.to_string(), "Esc");
        assert_eq!(Key::BackTab.to_string(), "Shift+Tab");
    }
}
