//! Session state machine scenarios

use std::cell::{Cell, RefCell};
use std::io;

use tuish_config::{ConfigError, ConfigStore, Configuration};
use tuish_keybinds::{AliasRegistry, Key, Keybind};
use tuish_process::{ProcessError, RunRequest};
use tuish_tui::{BannerLevel, Effect, Focus, FormField, Mode, SessionController};

#[derive(Default)]
struct MemoryStore {
    saved: RefCell<Option<Configuration>>,
    fail: Cell<bool>,
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> tuish_config::Result<Configuration> {
        self.saved
            .borrow()
            .clone()
            .ok_or_else(|| ConfigError::NotFound("memory".into()))
    }

    fn save(&self, config: &Configuration) -> tuish_config::Result<()> {
        if self.fail.get() {
            return Err(ConfigError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only",
            )));
        }
        *self.saved.borrow_mut() = Some(config.clone());
        Ok(())
    }
}

fn session_with(aliases: &[(&str, &str, Option<char>)]) -> SessionController<MemoryStore> {
    let mut registry =
        AliasRegistry::new(Configuration::with_shell("/bin/sh"), MemoryStore::default());
    for (name, command, key) in aliases {
        registry
            .add(name, command, key.map(|c| Keybind::new(c).unwrap()))
            .unwrap();
    }
    SessionController::new(registry)
}

fn press<S: ConfigStore>(session: &mut SessionController<S>, keys: &[Key]) -> Option<Effect> {
    let mut last = None;
    for key in keys {
        last = session.handle_key(*key);
    }
    last
}

fn type_text<S: ConfigStore>(session: &mut SessionController<S>, text: &str) {
    for c in text.chars() {
        assert_eq!(session.handle_key(Key::Char(c)), None);
    }
}

fn form_field(session: &SessionController<MemoryStore>) -> FormField {
    session.state().mode.form().expect("form is open").field
}

fn form_error(session: &SessionController<MemoryStore>) -> Option<String> {
    session.state().mode.form().and_then(|form| form.error.clone())
}

#[test]
fn test_starts_browsing_actions() {
    let session = session_with(&[]);
    assert_eq!(session.state().mode, Mode::Browsing);
    assert_eq!(session.state().focus, Focus::ActionsPanel);
    assert_eq!(session.state().selected_action_index, 0);
    assert!(session.banner().is_none());
}

#[test]
fn test_navigation_is_clamped() {
    let mut session = session_with(&[
        ("a", "true", None),
        ("b", "true", None),
        ("c", "true", None),
    ]);
    press(&mut session, &[Key::Tab]);
    assert_eq!(session.state().focus, Focus::AliasesPanel);

    press(&mut session, &[Key::Up]);
    assert_eq!(session.state().selected_alias_index, 0);

    press(&mut session, &[Key::Down, Key::Down, Key::Down, Key::Down, Key::Down]);
    assert_eq!(session.state().selected_alias_index, 2);

    press(
        &mut session,
        &[
            Key::BackTab,
            Key::Down,
            Key::Down,
            Key::Down,
            Key::Down,
            Key::Down,
            Key::Down,
        ],
    );
    assert_eq!(session.state().focus, Focus::ActionsPanel);
    assert_eq!(session.state().selected_action_index, 4);
    // The alias selection is untouched by moves in the other panel
    assert_eq!(session.state().selected_alias_index, 2);
}

#[test]
fn test_add_alias_selects_it() {
    let mut session = session_with(&[("first", "true", None)]);
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "second");
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "echo two");
    press(&mut session, &[Key::Enter, Key::Enter]);

    assert_eq!(session.state().mode, Mode::Browsing);
    assert_eq!(session.state().selected_alias_index, 1);
    let alias = session.registry().get("second").unwrap();
    assert_eq!(alias.command, "echo two");
    assert_eq!(alias.keybind, None);

    let saved = session.registry().to_configuration();
    assert_eq!(saved.aliases.keys().collect::<Vec<_>>(), vec!["first", "second"]);
}

#[test]
fn test_add_duplicate_name_keeps_form() {
    let mut session = session_with(&[("Example Shell", "bash", None)]);
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "Example Shell");
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "zsh");
    press(&mut session, &[Key::Enter, Key::Enter]);

    assert!(matches!(session.state().mode, Mode::AddingAlias(_)));
    assert_eq!(form_field(&session), FormField::Name);
    assert_eq!(
        form_error(&session).as_deref(),
        Some("An alias named 'Example Shell' already exists")
    );
    let form = session.state().mode.form().unwrap();
    assert_eq!(form.command, "zsh");
    assert_eq!(session.registry().len(), 1);
    assert_eq!(session.registry().get("Example Shell").unwrap().command, "bash");
}

#[test]
fn test_add_keybind_in_use_then_fix() {
    let mut session = session_with(&[("A", "echo a", Some('x'))]);
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "B");
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "echo b");
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "x");
    press(&mut session, &[Key::Enter]);

    assert_eq!(form_field(&session), FormField::Keybind);
    assert_eq!(
        form_error(&session).as_deref(),
        Some("Keybind 'x' is already used by 'A'")
    );
    assert!(session.registry().get("B").is_none());

    // Typing replaces the single keybind character and clears the error
    type_text(&mut session, "y");
    assert_eq!(form_error(&session), None);
    press(&mut session, &[Key::Enter]);

    assert_eq!(session.state().mode, Mode::Browsing);
    let b = session.registry().get("B").unwrap();
    assert_eq!(b.keybind, Some(Keybind::new('y').unwrap()));
    assert_eq!(
        session
            .registry()
            .resolve_by_keybind(Keybind::new('x').unwrap())
            .unwrap()
            .name,
        "A"
    );
}

#[test]
fn test_empty_fields_are_rejected() {
    let mut session = session_with(&[]);
    press(&mut session, &[Key::Enter, Key::Enter]);
    assert_eq!(form_field(&session), FormField::Name);
    assert_eq!(form_error(&session).as_deref(), Some("Name cannot be empty"));

    type_text(&mut session, "n");
    press(&mut session, &[Key::Enter, Key::Enter]);
    assert_eq!(form_field(&session), FormField::Command);
    assert_eq!(form_error(&session).as_deref(), Some("Command cannot be empty"));
}

#[test]
fn test_backspace_edits_active_field() {
    let mut session = session_with(&[]);
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "lsx");
    press(&mut session, &[Key::Backspace]);
    assert_eq!(session.state().mode.form().unwrap().name, "ls");
}

#[test]
fn test_escape_cancels_form() {
    let mut session = session_with(&[]);
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "half");
    press(&mut session, &[Key::Escape]);

    assert_eq!(session.state().mode, Mode::Browsing);
    assert!(session.registry().is_empty());
}

#[test]
fn test_keybind_char_in_form_is_text() {
    let mut session = session_with(&[("list", "ls", Some('l'))]);
    press(&mut session, &[Key::Enter]);
    assert_eq!(session.handle_key(Key::Char('l')), None);
    assert_eq!(session.state().mode.form().unwrap().name, "l");
}

#[test]
fn test_edit_alias() {
    let mut session = session_with(&[("build", "make", Some('b')), ("test", "make test", None)]);
    press(&mut session, &[Key::Tab, Key::Down, Key::Tab, Key::Down, Key::Enter]);

    let form = session.state().mode.form().unwrap().clone();
    assert!(matches!(session.state().mode, Mode::EditingAlias(_)));
    assert_eq!(form.name, "test");
    assert_eq!(form.field, FormField::Command);

    type_text(&mut session, " -v");
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "t");
    press(&mut session, &[Key::Enter]);

    assert_eq!(session.state().mode, Mode::Browsing);
    let alias = session.registry().get("test").unwrap();
    assert_eq!(alias.command, "make test -v");
    assert_eq!(alias.keybind, Some(Keybind::new('t').unwrap()));
    assert_eq!(session.banner().unwrap().message, "Updated alias 'test'");
}

#[test]
fn test_edit_keybind_collision() {
    let mut session = session_with(&[("build", "make", Some('b')), ("test", "make test", None)]);
    press(&mut session, &[Key::Tab, Key::Down, Key::Tab, Key::Down, Key::Enter, Key::Enter]);
    type_text(&mut session, "b");
    press(&mut session, &[Key::Enter]);

    assert!(matches!(session.state().mode, Mode::EditingAlias(_)));
    assert_eq!(
        form_error(&session).as_deref(),
        Some("Keybind 'b' is already used by 'build'")
    );
    assert_eq!(session.registry().get("test").unwrap().keybind, None);
}

#[test]
fn test_edit_keeps_own_keybind() {
    let mut session = session_with(&[("build", "make", Some('b'))]);
    press(&mut session, &[Key::Down, Key::Enter]);
    type_text(&mut session, " all");
    press(&mut session, &[Key::Enter, Key::Enter]);

    assert_eq!(session.state().mode, Mode::Browsing);
    let alias = session.registry().get("build").unwrap();
    assert_eq!(alias.command, "make all");
    assert_eq!(alias.keybind, Some(Keybind::new('b').unwrap()));
}

#[test]
fn test_remove_confirmed_and_selection_clamped() {
    let mut session = session_with(&[("a", "true", Some('a')), ("b", "true", Some('b'))]);
    press(&mut session, &[Key::Tab, Key::Down, Key::Tab, Key::Down, Key::Down, Key::Enter]);
    assert_eq!(
        session.state().mode,
        Mode::ConfirmingRemoval { name: "b".into() }
    );

    press(&mut session, &[Key::Char('y')]);
    assert_eq!(session.state().mode, Mode::Browsing);
    assert!(session.registry().get("b").is_none());
    assert_eq!(session.state().selected_alias_index, 0);
    assert!(session
        .registry()
        .resolve_by_keybind(Keybind::new('b').unwrap())
        .is_none());
}

#[test]
fn test_remove_declined() {
    let mut session = session_with(&[("a", "true", None)]);
    press(&mut session, &[Key::Down, Key::Down, Key::Enter, Key::Char('n')]);
    assert_eq!(session.state().mode, Mode::Browsing);
    assert_eq!(session.registry().len(), 1);
}

#[test]
fn test_edit_and_remove_without_aliases() {
    let mut session = session_with(&[]);
    press(&mut session, &[Key::Down, Key::Enter]);
    assert_eq!(session.state().mode, Mode::Browsing);
    assert_eq!(session.banner().unwrap().message, "No aliases to edit");

    press(&mut session, &[Key::Down]);
    assert!(session.banner().is_none());
    press(&mut session, &[Key::Enter]);
    assert_eq!(session.banner().unwrap().message, "No aliases to remove");
}

#[test]
fn test_keybind_runs_alias() {
    let mut session = session_with(&[("greet", "echo 'hi'", Some('g'))]);
    let effect = session.handle_key(Key::Char('g'));

    assert_eq!(effect, Some(Effect::Run(RunRequest::alias("/bin/sh", "echo 'hi'"))));
    assert_eq!(session.state().mode.kind(), tuish_tui::ModeKind::RunningProcess);

    // Keys are inert until the run is reported back
    assert_eq!(session.handle_key(Key::Char('g')), None);
    assert_eq!(session.handle_key(Key::Enter), None);

    session.finish_run(Err(ProcessError::Spawn {
        program: "/bin/sh".into(),
        source: io::Error::new(io::ErrorKind::NotFound, "missing"),
    }));
    assert_eq!(session.state().mode, Mode::Browsing);
    let banner = session.banner().unwrap();
    assert_eq!(banner.level, BannerLevel::Error);
    assert!(banner.message.starts_with("Could not run 'greet'"));
}

#[test]
fn test_enter_on_alias_runs_it() {
    let mut session = session_with(&[("a", "true", None), ("b", "false", None)]);
    let effect = press(&mut session, &[Key::Tab, Key::Down, Key::Enter]);
    assert_eq!(effect, Some(Effect::Run(RunRequest::alias("/bin/sh", "false"))));
}

#[test]
fn test_enter_on_empty_alias_panel() {
    let mut session = session_with(&[]);
    let effect = press(&mut session, &[Key::Tab, Key::Enter]);
    assert_eq!(effect, None);
    assert_eq!(session.state().mode, Mode::Browsing);
}

#[test]
fn test_go_to_shell_and_exit() {
    let mut session = session_with(&[]);
    let effect = press(&mut session, &[Key::Down, Key::Down, Key::Down, Key::Enter]);
    assert_eq!(effect, Some(Effect::Run(RunRequest::interactive("/bin/sh"))));

    session.finish_run(Err(ProcessError::Wait(io::Error::new(io::ErrorKind::Other, "lost"))));
    assert_eq!(session.state().mode, Mode::Browsing);

    let effect = press(&mut session, &[Key::Down, Key::Enter]);
    assert_eq!(effect, Some(Effect::Exit));
}

#[cfg(unix)]
#[test]
fn test_finish_run_reports_failure_exit() {
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    let mut session = session_with(&[("fail", "exit 3", Some('f'))]);
    session.handle_key(Key::Char('f'));
    session.finish_run(Ok(ExitStatus::from_raw(3 << 8)));

    assert_eq!(session.state().mode, Mode::Browsing);
    assert_eq!(session.banner().unwrap().message, "'fail' exited with: exit code 3");

    session.handle_key(Key::Char('f'));
    session.finish_run(Ok(ExitStatus::from_raw(0)));
    assert!(session.banner().is_none());
}

#[test]
fn test_save_failure_is_reported_but_kept() {
    let store = MemoryStore::default();
    store.fail.set(true);
    let registry = AliasRegistry::new(Configuration::with_shell("/bin/sh"), &store);
    let mut session = SessionController::new(registry);

    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "keep");
    press(&mut session, &[Key::Enter]);
    type_text(&mut session, "true");
    press(&mut session, &[Key::Enter, Key::Enter]);

    assert_eq!(session.state().mode, Mode::Browsing);
    assert!(session.registry().get("keep").is_some());
    let banner = session.banner().unwrap();
    assert_eq!(banner.level, BannerLevel::Error);
    assert!(banner.message.contains("was not saved"));
    assert!(store.saved.borrow().is_none());
}
