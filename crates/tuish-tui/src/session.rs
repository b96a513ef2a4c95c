//! Session state machine
//!
//! `SessionController` owns the alias registry and the [`SessionState`]. Every
//! key goes through [`KeyDispatcher`] and then through one transition here.
//! Work that has to leave the UI (running a child, quitting) comes back to
//! the event loop as an [`Effect`]; the loop reports a run's outcome through
//! [`SessionController::finish_run`].

use std::process::ExitStatus;

use tracing::{debug, info, warn};
use tuish_config::{ConfigError, ConfigStore};
use tuish_keybinds::{Alias, AliasRegistry, Committed, Key, Keybind, RegistryError};
use tuish_process::{exit_summary, ProcessError, RunRequest};

use crate::{
    dispatch::{Action, KeyDispatcher},
    state::{
        step_index, AliasForm, Banner, FixedAction, Focus, FormField, Mode, RunTarget,
        SessionState,
    },
};

/// Work the event loop must perform on behalf of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand the terminal to a child; report back with `finish_run`
    Run(RunRequest),
    /// Leave the session
    Exit,
}

/// The session: registry, focus, selection, mode, and footer banner
pub struct SessionController<S> {
    registry: AliasRegistry<S>,
    state: SessionState,
    banner: Option<Banner>,
    dispatcher: KeyDispatcher,
}

impl<S: ConfigStore> SessionController<S> {
    /// Start browsing with focus on the Actions panel
    pub fn new(registry: AliasRegistry<S>) -> Self {
        Self {
            registry,
            state: SessionState::default(),
            banner: None,
            dispatcher: KeyDispatcher::new(),
        }
    }

    /// Dispatch `key` and apply the resulting action
    pub fn handle_key(&mut self, key: Key) -> Option<Effect> {
        let action = self.dispatcher.dispatch(
            self.state.mode.kind(),
            self.state.focus,
            key,
            &self.registry,
        );
        debug!(key = %key, action = ?action, "Key dispatched");
        self.apply(action)
    }

    /// Apply one action to the session
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        if action == Action::Noop {
            return None;
        }
        self.banner = None;

        match std::mem::take(&mut self.state.mode) {
            Mode::Browsing => self.browse(action),
            Mode::AddingAlias(form) => {
                self.state.mode = self.update_form(form, action, false);
                None
            }
            Mode::EditingAlias(form) => {
                self.state.mode = self.update_form(form, action, true);
                None
            }
            Mode::ConfirmingRemoval { name } => {
                self.confirm_removal(name, action);
                None
            }
            // A child owns the terminal; dispatch yields Noop, so this is unreachable from keys
            mode @ Mode::RunningProcess(_) => {
                self.state.mode = mode;
                None
            }
        }
    }

    /// Return to browsing after a child started by [`Effect::Run`] is done
    pub fn finish_run(&mut self, result: Result<ExitStatus, ProcessError>) {
        let target = match std::mem::take(&mut self.state.mode) {
            Mode::RunningProcess(target) => target,
            other => {
                warn!(mode = ?other.kind(), "finish_run called while no process was running");
                self.state.mode = other;
                return;
            }
        };

        let label = match &target {
            RunTarget::Alias(name) => format!("'{}'", name),
            RunTarget::Shell => "shell".to_string(),
        };

        match result {
            Ok(status) if status.success() => {
                info!(target = %label, "Run finished");
            }
            Ok(status) => {
                info!(target = %label, status = %status, "Run finished with failure");
                if let RunTarget::Alias(_) = target {
                    self.banner = Some(Banner::info(format!(
                        "{} exited with: {}",
                        label,
                        exit_summary(&status)
                    )));
                }
            }
            Err(e) => {
                warn!(target = %label, error = %e, "Run failed");
                self.banner = Some(Banner::error(format!("Could not run {}: {}", label, e)));
            }
        }

        self.state.clamp(self.registry.len());
    }

    fn browse(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::MoveSelection(delta) => {
                match self.state.focus {
                    Focus::AliasesPanel => {
                        self.state.selected_alias_index =
                            step_index(self.state.selected_alias_index, delta, self.registry.len());
                    }
                    Focus::ActionsPanel => {
                        self.state.selected_action_index = step_index(
                            self.state.selected_action_index,
                            delta,
                            FixedAction::ALL.len(),
                        );
                    }
                }
                None
            }
            Action::SwitchFocus => {
                self.state.focus = self.state.focus.toggled();
                None
            }
            Action::Activate => match self.state.focus {
                Focus::AliasesPanel => {
                    let alias = self.registry.get_index(self.state.selected_alias_index)?.clone();
                    Some(self.start_alias(&alias))
                }
                Focus::ActionsPanel => self.activate_fixed(self.state.selected_action()),
            },
            Action::RunAliasByKeybind(alias) => Some(self.start_alias(&alias)),
            Action::Cancel | Action::TextInput(_) | Action::DeleteBackward | Action::Noop => None,
        }
    }

    fn activate_fixed(&mut self, action: FixedAction) -> Option<Effect> {
        match action {
            FixedAction::AddAlias => {
                self.state.mode = Mode::AddingAlias(AliasForm::for_add());
                None
            }
            FixedAction::EditAlias => {
                match self.selected_alias().map(AliasForm::for_edit) {
                    Some(form) => self.state.mode = Mode::EditingAlias(form),
                    None => self.banner = Some(Banner::info("No aliases to edit")),
                }
                None
            }
            FixedAction::RemoveAlias => {
                match self.selected_alias().map(|alias| alias.name.clone()) {
                    Some(name) => self.state.mode = Mode::ConfirmingRemoval { name },
                    None => self.banner = Some(Banner::info("No aliases to remove")),
                }
                None
            }
            FixedAction::GoToShell => {
                self.state.mode = Mode::RunningProcess(RunTarget::Shell);
                info!(shell = %self.registry.default_shell(), "Starting interactive shell");
                Some(Effect::Run(RunRequest::interactive(self.registry.default_shell())))
            }
            FixedAction::ExitShell => {
                info!("Exit requested");
                Some(Effect::Exit)
            }
        }
    }

    fn start_alias(&mut self, alias: &Alias) -> Effect {
        info!(alias = %alias.name, "Running alias");
        self.state.mode = Mode::RunningProcess(RunTarget::Alias(alias.name.clone()));
        Effect::Run(RunRequest::alias(
            self.registry.default_shell(),
            alias.command.as_str(),
        ))
    }

    fn update_form(&mut self, mut form: AliasForm, action: Action, editing: bool) -> Mode {
        let wrap: fn(AliasForm) -> Mode = if editing {
            Mode::EditingAlias
        } else {
            Mode::AddingAlias
        };

        match action {
            Action::TextInput(c) => {
                form.input(c);
                form.error = None;
            }
            Action::DeleteBackward => {
                form.delete_backward();
                form.error = None;
            }
            Action::Cancel => {
                debug!(editing, "Form cancelled");
                return Mode::Browsing;
            }
            Action::Activate => return self.advance_form(form, editing),
            _ => {}
        }
        wrap(form)
    }

    /// Enter in a form: move to the next field, or submit from the last one
    fn advance_form(&mut self, mut form: AliasForm, editing: bool) -> Mode {
        let wrap: fn(AliasForm) -> Mode = if editing {
            Mode::EditingAlias
        } else {
            Mode::AddingAlias
        };

        match form.field {
            FormField::Name => {
                if form.name.trim().is_empty() {
                    form.reject(FormField::Name, "Name cannot be empty");
                } else {
                    form.field = FormField::Command;
                    form.error = None;
                }
                wrap(form)
            }
            FormField::Command => {
                if form.command.trim().is_empty() {
                    form.reject(FormField::Command, "Command cannot be empty");
                } else {
                    form.field = FormField::Keybind;
                    form.error = None;
                }
                wrap(form)
            }
            FormField::Keybind => match self.submit(&form, editing) {
                Ok(committed) => {
                    let name = committed.value.name.clone();
                    if let Some(position) = self.registry.position(&name) {
                        self.state.selected_alias_index = position;
                    }
                    let verb = if editing { "Updated" } else { "Added" };
                    self.report_save(committed.save_error, verb, &name);
                    Mode::Browsing
                }
                Err(RegistryError::NotFound(name)) => {
                    self.banner = Some(Banner::error(format!("Alias '{}' no longer exists", name)));
                    self.state.clamp(self.registry.len());
                    Mode::Browsing
                }
                Err(e) => {
                    form.reject(field_for(&e), e.to_string());
                    wrap(form)
                }
            },
        }
    }

    fn submit(
        &mut self,
        form: &AliasForm,
        editing: bool,
    ) -> Result<Committed<Alias>, RegistryError> {
        let keybind = Keybind::parse_optional(&form.keybind)?;
        if editing {
            self.registry.edit(&form.name, &form.command, keybind)
        } else {
            self.registry.add(&form.name, &form.command, keybind)
        }
    }

    fn confirm_removal(&mut self, name: String, action: Action) {
        match action {
            Action::Activate => {
                match self.registry.remove(&name) {
                    Ok(committed) => self.report_save(committed.save_error, "Removed", &name),
                    Err(e) => self.banner = Some(Banner::error(e.to_string())),
                }
                self.state.clamp(self.registry.len());
                self.state.mode = Mode::Browsing;
            }
            Action::Cancel => self.state.mode = Mode::Browsing,
            _ => self.state.mode = Mode::ConfirmingRemoval { name },
        }
    }

    fn report_save(&mut self, save_error: Option<ConfigError>, verb: &str, name: &str) {
        self.banner = Some(match save_error {
            None => Banner::info(format!("{} alias '{}'", verb, name)),
            Some(e) => Banner::error(format!(
                "{} alias '{}', but the configuration was not saved: {}",
                verb, name, e
            )),
        });
    }
}

impl<S> SessionController<S> {
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn registry(&self) -> &AliasRegistry<S> {
        &self.registry
    }

    /// Footer message left by the last transition
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Alias under the cursor in the Aliases panel
    pub fn selected_alias(&self) -> Option<&Alias> {
        self.registry.get_index(self.state.selected_alias_index)
    }
}

/// Field that caused a rejected submit
fn field_for(error: &RegistryError) -> FormField {
    match error {
        RegistryError::DuplicateName(_) | RegistryError::InvalidName(_) => FormField::Name,
        RegistryError::EmptyCommand => FormField::Command,
        RegistryError::KeybindInUse { .. } | RegistryError::InvalidKeybind(_) => FormField::Keybind,
        RegistryError::NotFound(_) => FormField::Name,
    }
}
