//! tuish Terminal User Interface
//!
//! Two panels, "Aliases" and "Actions", driven by an explicit session state
//! machine:
//! - `dispatch`: maps a key in the current mode and focus to an `Action`
//! - `session`: the `SessionController` state machine and its `Effect`s
//! - `view`: ratatui rendering of the session
//! - `terminal_state`: raw mode / alternate screen ownership and hand-over
//! - `app`: the single-threaded event loop tying it together

pub mod app;
pub mod bridge;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod state;
pub mod terminal_state;
pub mod view;

pub use app::{App, UiTerminal};
pub use dispatch::{Action, KeyDispatcher};
pub use error::{TuiError, TuiResult};
pub use session::{Effect, SessionController};
pub use state::{
    AliasForm, Banner, BannerLevel, FixedAction, Focus, FormField, Mode, ModeKind, SessionState,
};
pub use terminal_state::TerminalSession;
