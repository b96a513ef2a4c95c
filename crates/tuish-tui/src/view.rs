//! View function
//!
//! Pure rendering of a [`SessionController`]: a header, the "Aliases" and
//! "Actions" panels, a one-line footer, and a popup for forms and the removal
//! dialog. Nothing here changes state.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::{
    session::SessionController,
    state::{AliasForm, BannerLevel, FixedAction, Focus, FormField, Mode, RunTarget},
};

/// Smallest terminal the panels fit in
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

pub const TOO_SMALL_MESSAGE: &str = "Terminal too small, need at least 40x10";

const HEADER: &str = "tuish";
const NO_ALIASES: &str = "(no aliases)";

/// Main view function
pub fn render<S>(frame: &mut Frame, session: &SessionController<S>) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(TOO_SMALL_MESSAGE)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(warning, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Aliases
            Constraint::Length(FixedAction::ALL.len() as u16 + 2), // Actions
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_aliases(frame, chunks[1], session);
    render_actions(frame, chunks[2], session);
    render_footer(frame, chunks[3], session);

    match &session.state().mode {
        Mode::AddingAlias(form) => render_form(frame, area, "Add alias", form, false),
        Mode::EditingAlias(form) => render_form(frame, area, "Edit alias", form, true),
        Mode::ConfirmingRemoval { name } => render_confirmation(frame, area, name),
        Mode::Browsing | Mode::RunningProcess(_) => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        HEADER,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, area);
}

fn panel_block(title: &'static str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

fn render_aliases<S>(frame: &mut Frame, area: Rect, session: &SessionController<S>) {
    let focused = session.state().focus == Focus::AliasesPanel;
    let block = panel_block("Aliases", focused);
    let registry = session.registry();

    if registry.is_empty() {
        let placeholder = Paragraph::new(NO_ALIASES)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = registry
        .list()
        .map(|alias| ListItem::new(alias.display_line()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(focused))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(session.state().selected_alias_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_actions<S>(frame: &mut Frame, area: Rect, session: &SessionController<S>) {
    let focused = session.state().focus == Focus::ActionsPanel;
    let items: Vec<ListItem> = FixedAction::ALL
        .iter()
        .map(|action| ListItem::new(action.label()))
        .collect();
    let list = List::new(items)
        .block(panel_block("Actions", focused))
        .highlight_style(highlight_style(focused))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(session.state().selected_action_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_footer<S>(frame: &mut Frame, area: Rect, session: &SessionController<S>) {
    let line = match (session.banner(), &session.state().mode) {
        (Some(banner), _) => {
            let color = match banner.level {
                BannerLevel::Info => Color::Green,
                BannerLevel::Error => Color::Red,
            };
            Line::from(Span::styled(banner.message.as_str(), Style::default().fg(color)))
        }
        (None, Mode::RunningProcess(RunTarget::Alias(name))) => {
            Line::from(format!("Running '{}'...", name))
        }
        (None, Mode::RunningProcess(RunTarget::Shell)) => Line::from("Running shell..."),
        (None, Mode::AddingAlias(_) | Mode::EditingAlias(_)) => {
            Line::from("Enter: next field  Backspace: delete  Esc: cancel")
        }
        (None, Mode::ConfirmingRemoval { .. }) => Line::from("y: remove  n: keep"),
        (None, Mode::Browsing) => Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(": switch panel  "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(": select  "),
            Span::styled("[key]", Style::default().fg(Color::Cyan)),
            Span::raw(": run alias"),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_form(
    frame: &mut Frame,
    area: Rect,
    title: &'static str,
    form: &AliasForm,
    editing: bool,
) {
    let mut lines = Vec::new();
    for field in [FormField::Name, FormField::Command, FormField::Keybind] {
        let active = field == form.field;
        let marker = if active { "> " } else { "  " };
        let cursor = if active { "_" } else { "" };
        let value_style = if field == FormField::Name && editing {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{}: ", field.label()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(format!("{}{}", form.value(field), cursor), value_style),
        ]));
    }
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    let popup = centered_rect(60, 7, area);
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn render_confirmation(frame: &mut Frame, area: Rect, name: &str) {
    let popup = centered_rect(50, 3, area);
    let paragraph = Paragraph::new(format!("Remove alias '{}'? (y/n)", name))
        .block(Block::default().borders(Borders::ALL).title("Remove alias"));
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

/// Rectangle of at most `width` x `height` cells centered in `r`
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
