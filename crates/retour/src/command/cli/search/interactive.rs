use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::{Terminal, prelude::CrosstermBackend};
use retour_database::record::model::Record;

use super::app::{Action, SearchApp, SessionResult};
use super::event::{Event, EventHandler};
use super::tui::Tui;
use super::view::Theme;
use crate::command::AppResult;

const TICK_RATE_MS: u64 = 250;

/// Run an interactive search over `records` until the user confirms or cancels.
///
/// `query` pre-fills the filter. The terminal is restored before returning,
/// whether or not the session ended cleanly.
pub fn run(records: Vec<Record>, query: &str, theme: &Theme) -> AppResult<SessionResult> {
    let mut app = SearchApp::with_query(records, query);

    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;
    let events = EventHandler::new(TICK_RATE_MS);
    let mut tui = Tui::new(terminal, events);
    tui.init()?;

    let outcome = event_loop(&mut tui, &mut app, theme);
    tui.exit()?;
    outcome?;

    debug!("search session ended with {:?}", app.result());
    Ok(app.into_result())
}

fn event_loop<B: ratatui::backend::Backend>(
    tui: &mut Tui<B>,
    app: &mut SearchApp,
    theme: &Theme,
) -> AppResult<()> {
    let _ = app.update(Action::Resize(tui.height()?));

    while app.is_running() {
        tui.draw(app, theme)?;
        if let Some(action) = event_action(tui.events.next()?) {
            let _ = app.update(action);
        }
    }
    Ok(())
}

/// Map a terminal event to the action it triggers, if any.
fn event_action(event: Event) -> Option<Action> {
    match event {
        Event::Key(key_event) => key_action(key_event),
        Event::Paste(text) => Some(paste_action(&text)),
        Event::Resize(rows) => Some(Action::Resize(rows)),
        Event::Tick => None,
    }
}

/// Map a key press to the action it triggers, if any.
pub fn key_action(key_event: KeyEvent) -> Option<Action> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key_event.code {
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('c') if ctrl => Action::Cancel,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Char('p') if ctrl => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Char('n') if ctrl => Action::MoveDown,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::Home,
        KeyCode::Char('a') if ctrl => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Char('e') if ctrl => Action::End,
        KeyCode::Char('w') if ctrl => Action::DeleteWordBackward,
        KeyCode::Char('k') if ctrl => Action::DeleteToLineEnd,
        KeyCode::Char(c) if !ctrl && !key_event.modifiers.contains(KeyModifiers::ALT) => {
            Action::Insert(c.to_string())
        }
        _ => return None,
    };
    Some(action)
}

/// Pasted text is inserted as typed, flattened onto one line.
fn paste_action(text: &str) -> Action {
    let flattened = text
        .chars()
        .filter(|&c| c != '\r')
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    Action::Insert(flattened)
}
