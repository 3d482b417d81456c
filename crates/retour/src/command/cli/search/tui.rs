use std::io;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::Backend;
use time::OffsetDateTime;

use super::app::SearchApp;
use super::event::EventHandler;
use super::view::{SearchView, Theme};
use crate::command::AppResult;

/// Representation of a terminal user interface.
///
/// It is responsible for setting up the terminal,
/// initializing the interface and handling the draw events.
#[derive(Debug)]
pub struct Tui<B: Backend> {
    /// Interface to the Terminal.
    terminal: Terminal<B>,
    /// Terminal event handler.
    pub events: EventHandler,
}

impl<B: Backend> Tui<B> {
    /// Constructs a new instance of [`Tui`].
    pub fn new(terminal: Terminal<B>, events: EventHandler) -> Self {
        Self { terminal, events }
    }

    /// Initializes the terminal interface.
    ///
    /// It enables the raw mode and sets terminal properties. Everything is
    /// drawn on stderr so stdout only ever carries the selected command.
    pub fn init(&mut self) -> AppResult<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stderr(), EnterAlternateScreen, EnableBracketedPaste)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Rows currently available on the terminal.
    pub fn height(&self) -> AppResult<u16> {
        Ok(self.terminal.size()?.height)
    }

    /// [`Draw`] the terminal interface by rendering a [`SearchView`] of `app`.
    ///
    /// [`Draw`]: ratatui::Terminal::draw
    pub fn draw(&mut self, app: &SearchApp, theme: &Theme) -> AppResult<()> {
        let view = SearchView {
            app,
            theme,
            now: OffsetDateTime::now_utc(),
        };
        self.terminal.draw(|frame| {
            let area = frame.area();
            if let Some(cursor) = view.cursor_position(area) {
                frame.set_cursor_position(cursor);
            }
            frame.render_widget_ref(view, area);
        })?;
        Ok(())
    }

    /// Exits the terminal interface.
    ///
    /// It disables the raw mode and reverts back the terminal properties.
    pub fn exit(&mut self) -> AppResult<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stderr(), LeaveAlternateScreen, DisableBracketedPaste)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}
