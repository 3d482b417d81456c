use std::ops::ControlFlow;

use retour_database::record::model::Record;

use super::editor;
use super::filter::FilterEngine;
use super::viewport::{Viewport, visible_range};

/// Terminal rows that are not available to the record list: the status line
/// and the filter line.
pub const RESERVED_ROWS: u16 = 2;

/// A single input to the search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    Confirm,
    Cancel,
    /// Typed or pasted text, inserted at the text cursor.
    Insert(String),
    Backspace,
    DeleteWordBackward,
    DeleteToLineEnd,
    CursorLeft,
    CursorRight,
    Home,
    End,
    /// The terminal now has this many rows.
    Resize(u16),
}

/// The outcome of a search session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionResult {
    #[default]
    Running,
    Cancelled,
    Selected(Record),
}

/// A record in the visible part of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRow<'a> {
    pub record: &'a Record,
    pub highlighted: bool,
}

/// State of one interactive search over a fixed set of records.
///
/// The app never talks to the database: it is handed the records up front and
/// only narrows, navigates and finally picks one of them.
#[derive(Debug, Clone)]
pub struct SearchApp {
    engine: FilterEngine,
    list_cursor: usize,
    text_cursor: usize,
    height: u16,
    result: SessionResult,
    finished: bool,
}

impl SearchApp {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            engine: FilterEngine::new(records),
            list_cursor: 0,
            text_cursor: 0,
            height: 0,
            result: SessionResult::Running,
            finished: false,
        }
    }

    /// Start a session with `query` already typed into the filter.
    pub fn with_query(records: Vec<Record>, query: &str) -> Self {
        let mut app = Self::new(records);
        app.apply_edit((query.to_owned(), editor::char_len(query)));
        app
    }

    /// Apply one action to the session.
    ///
    /// Returns `Break` once the session has ended, after which every further
    /// action is ignored.
    pub fn update(&mut self, action: Action) -> ControlFlow<()> {
        if self.finished {
            return ControlFlow::Break(());
        }

        let text = self.engine.filter_text();
        match action {
            Action::MoveUp => self.list_cursor = self.list_cursor.saturating_sub(1),
            Action::MoveDown => {
                self.list_cursor = (self.list_cursor + 1).min(self.engine.len().saturating_sub(1));
            }
            Action::Confirm => {
                // With nothing to select the session ends but stays `Running`.
                if let Some(record) = self.engine.get(self.list_cursor) {
                    self.result = SessionResult::Selected(record.clone());
                }
                return self.finish();
            }
            Action::Cancel => {
                self.result = SessionResult::Cancelled;
                return self.finish();
            }
            Action::Insert(inserted) => {
                let edit = editor::insert_at(text, self.text_cursor, &inserted);
                self.apply_edit(edit);
            }
            Action::Backspace => {
                let edit = editor::delete_before_cursor(text, self.text_cursor);
                self.apply_edit(edit);
            }
            Action::DeleteWordBackward => {
                let start = editor::word_start_before(text, self.text_cursor);
                let edit = editor::delete_range(text, start, self.text_cursor);
                self.apply_edit(edit);
            }
            Action::DeleteToLineEnd => {
                let edit = editor::delete_to_end(text, self.text_cursor);
                self.apply_edit(edit);
            }
            Action::CursorLeft => self.text_cursor = self.text_cursor.saturating_sub(1),
            Action::CursorRight => {
                self.text_cursor = (self.text_cursor + 1).min(editor::char_len(text));
            }
            Action::Home => self.text_cursor = 0,
            Action::End => self.text_cursor = editor::char_len(text),
            Action::Resize(height) => self.height = height,
        }
        ControlFlow::Continue(())
    }

    fn finish(&mut self) -> ControlFlow<()> {
        self.finished = true;
        ControlFlow::Break(())
    }

    /// Store an edited filter, re-filter and move the selection back to the top.
    fn apply_edit(&mut self, (text, cursor): (String, usize)) {
        self.engine.set_filter(&text);
        self.text_cursor = cursor;
        self.list_cursor = 0;
    }

    pub fn is_running(&self) -> bool {
        !self.finished
    }

    pub fn result(&self) -> &SessionResult {
        &self.result
    }

    pub fn into_result(self) -> SessionResult {
        self.result
    }

    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn text_cursor(&self) -> usize {
        self.text_cursor
    }

    pub fn filter_text(&self) -> &str {
        self.engine.filter_text()
    }

    /// The filter text split at the text cursor.
    pub fn filter_split(&self) -> (&str, &str) {
        editor::split_at_cursor(self.engine.filter_text(), self.text_cursor)
    }

    /// The records matching the current filter.
    pub fn matches(&self) -> &FilterEngine {
        &self.engine
    }

    /// Rows available to the record list.
    pub fn list_height(&self) -> u16 {
        self.height.saturating_sub(RESERVED_ROWS)
    }

    pub fn viewport(&self) -> Viewport {
        visible_range(
            self.engine.len(),
            self.list_cursor,
            usize::from(self.list_height()),
        )
    }

    /// The rows to draw, top to bottom, or `None` if there is no room for any.
    pub fn visible_rows(&self) -> Option<Vec<ListRow<'_>>> {
        let Viewport::Visible(range) = self.viewport() else {
            return None;
        };
        let rows = self
            .engine
            .filtered()
            .enumerate()
            .skip(range.start)
            .take(range.len())
            .map(|(idx, record)| ListRow {
                record,
                highlighted: idx == self.list_cursor,
            })
            .collect();
        Some(rows)
    }
}
