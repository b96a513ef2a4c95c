//! Session state owned by the controller

use tuish_keybinds::Alias;

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    AliasesPanel,
    #[default]
    ActionsPanel,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::AliasesPanel => Focus::ActionsPanel,
            Focus::ActionsPanel => Focus::AliasesPanel,
        }
    }
}

/// Entries of the Actions panel, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedAction {
    AddAlias,
    EditAlias,
    RemoveAlias,
    GoToShell,
    ExitShell,
}

impl FixedAction {
    pub const ALL: [FixedAction; 5] = [
        FixedAction::AddAlias,
        FixedAction::EditAlias,
        FixedAction::RemoveAlias,
        FixedAction::GoToShell,
        FixedAction::ExitShell,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FixedAction::AddAlias => "Add an alias",
            FixedAction::EditAlias => "Edit an alias",
            FixedAction::RemoveAlias => "Remove an alias",
            FixedAction::GoToShell => "Go to shell",
            FixedAction::ExitShell => "Quit shell",
        }
    }
}

/// Field of the add/edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Command,
    Keybind,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Command => "Command",
            FormField::Keybind => "Keybind (single char, or empty)",
        }
    }
}

/// Partially entered alias; kept intact when a submit is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasForm {
    pub field: FormField,
    pub name: String,
    pub command: String,
    pub keybind: String,
    /// Validation message for the active field
    pub error: Option<String>,
}

impl AliasForm {
    /// Empty form starting at the name field
    pub fn for_add() -> Self {
        Self {
            field: FormField::Name,
            name: String::new(),
            command: String::new(),
            keybind: String::new(),
            error: None,
        }
    }

    /// Form pre-populated from `alias`; the name is fixed, so it starts at the command
    pub fn for_edit(alias: &Alias) -> Self {
        Self {
            field: FormField::Command,
            name: alias.name.clone(),
            command: alias.command.clone(),
            keybind: alias.keybind.map(|kb| kb.to_string()).unwrap_or_default(),
            error: None,
        }
    }

    /// Type a character into the active field; the keybind field holds one char
    pub fn input(&mut self, c: char) {
        match self.field {
            FormField::Name => self.name.push(c),
            FormField::Command => self.command.push(c),
            FormField::Keybind => {
                self.keybind.clear();
                self.keybind.push(c);
            }
        }
    }

    pub fn delete_backward(&mut self) {
        match self.field {
            FormField::Name => self.name.pop(),
            FormField::Command => self.command.pop(),
            FormField::Keybind => self.keybind.pop(),
        };
    }

    /// Text of a field
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Command => &self.command,
            FormField::Keybind => &self.keybind,
        }
    }

    /// Move to `field` and show `message` there
    pub fn reject(&mut self, field: FormField, message: impl Into<String>) {
        self.field = field;
        self.error = Some(message.into());
    }
}

/// What the foreground child is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    Alias(String),
    Shell,
}

/// Session mode with the data each mode needs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browsing,
    AddingAlias(AliasForm),
    EditingAlias(AliasForm),
    ConfirmingRemoval { name: String },
    RunningProcess(RunTarget),
}

/// Data-free view of [`Mode`], used for key dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Browsing,
    AddingAlias,
    EditingAlias,
    ConfirmingRemoval,
    RunningProcess,
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Browsing => ModeKind::Browsing,
            Mode::AddingAlias(_) => ModeKind::AddingAlias,
            Mode::EditingAlias(_) => ModeKind::EditingAlias,
            Mode::ConfirmingRemoval { .. } => ModeKind::ConfirmingRemoval,
            Mode::RunningProcess(_) => ModeKind::RunningProcess,
        }
    }

    /// Active form, if the mode has one
    pub fn form(&self) -> Option<&AliasForm> {
        match self {
            Mode::AddingAlias(form) | Mode::EditingAlias(form) => Some(form),
            _ => None,
        }
    }
}

/// Focus, selection, and mode of the running session; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub focus: Focus,
    pub selected_alias_index: usize,
    pub selected_action_index: usize,
    pub mode: Mode,
}

impl SessionState {
    /// Keep both indices inside their lists; an empty list selects 0
    pub fn clamp(&mut self, alias_count: usize) {
        self.selected_alias_index = clamp_index(self.selected_alias_index, alias_count);
        self.selected_action_index =
            clamp_index(self.selected_action_index, FixedAction::ALL.len());
    }

    /// Action under the cursor in the Actions panel
    pub fn selected_action(&self) -> FixedAction {
        FixedAction::ALL[clamp_index(self.selected_action_index, FixedAction::ALL.len())]
    }
}

/// Move `index` by `delta`, clamped to `[0, count - 1]`
pub fn step_index(index: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let moved = if delta.is_negative() {
        index.saturating_sub(delta.unsigned_abs())
    } else {
        index.saturating_add(delta.unsigned_abs())
    };
    moved.min(count - 1)
}

fn clamp_index(index: usize, count: usize) -> usize {
    index.min(count.saturating_sub(1))
}

/// Severity of a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Info,
    Error,
}

/// One-line message in the footer, cleared by the next key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
}

impl Banner {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Error,
            message: message.into(),
        }
    }
}
