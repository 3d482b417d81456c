use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, WidgetRef},
};
use time::OffsetDateTime;

use super::app::{ListRow, SearchApp};
use super::duration::format_age;
use super::viewport::Viewport;

const PLACEHOLDER: &str = "Window too small";
const FILTER_PROMPT: &str = "Filter: ";

/// Styles used by the search screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub highlight: Style,
    pub success: Style,
    pub failure: Style,
    pub age: Style,
    pub status: Style,
    pub prompt: Style,
    pub filter: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            highlight: Style::new()
                .fg(Color::Indexed(205))
                .add_modifier(Modifier::BOLD),
            success: Style::new().fg(Color::Green),
            failure: Style::new().fg(Color::Red),
            age: Style::new().fg(Color::Blue),
            status: Style::new().fg(Color::Indexed(252)),
            prompt: Style::new().fg(Color::Yellow),
            filter: Style::new(),
        }
    }
}

/// Renders a [`SearchApp`] as of `now`.
///
/// The bottom two rows hold the status and filter lines; every row above
/// them belongs to the record list.
pub struct SearchView<'a> {
    pub app: &'a SearchApp,
    pub theme: &'a Theme,
    pub now: OffsetDateTime,
}

impl WidgetRef for SearchView<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let Some(rows) = self.app.visible_rows() else {
            Paragraph::new(PLACEHOLDER).render_ref(area, buf);
            return;
        };

        let [list, status, filter] = Self::layout(area);
        self.render_rows(list, buf, &rows);
        self.render_status(status, buf);
        self.render_filter(filter, buf);
    }
}

impl SearchView<'_> {
    fn layout(area: Rect) -> [Rect; 3] {
        Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area)
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer, rows: &[ListRow<'_>]) {
        let lines: Vec<Line<'_>> = rows.iter().map(|row| self.row_line(row)).collect();
        Paragraph::new(lines).render_ref(area, buf);
    }

    /// `"> ✓   5s git status"`: selection marker, exit status, age, command line.
    fn row_line(&self, row: &ListRow<'_>) -> Line<'_> {
        let record = row.record;
        let (marker, command_style) = if row.highlighted {
            ("> ", self.theme.highlight)
        } else {
            ("  ", Style::new())
        };
        let (glyph, glyph_style) = if record.succeeded() {
            ("✓", self.theme.success)
        } else {
            ("✗", self.theme.failure)
        };

        Line::from(vec![
            Span::styled(marker, self.theme.highlight),
            Span::styled(glyph, glyph_style),
            Span::styled(
                format!(" {:>4} ", format_age(record.timestamp, self.now)),
                self.theme.age,
            ),
            Span::styled(record.command_line(), command_style),
        ])
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let matches = self.app.matches();
        Paragraph::new(format!("  {}/{}", matches.len(), matches.total()))
            .style(self.theme.status)
            .render_ref(area, buf);
    }

    fn render_filter(&self, area: Rect, buf: &mut Buffer) {
        let (before, after) = self.app.filter_split();
        let line = Line::from(vec![
            Span::styled(FILTER_PROMPT, self.theme.prompt),
            Span::styled(before, self.theme.filter),
            Span::styled(after, self.theme.filter),
        ]);
        Paragraph::new(line).render_ref(area, buf);
    }

    /// Where the terminal cursor belongs: on the filter line at the text cursor.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if matches!(self.app.viewport(), Viewport::NoRoom) {
            return None;
        }
        let [_, _, filter] = Self::layout(area);
        let (before, _) = self.app.filter_split();
        let offset = Line::from(FILTER_PROMPT).width() + Line::from(before).width();
        let x = filter
            .x
            .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
            .min(filter.right().saturating_sub(1));
        Some(Position::new(x, filter.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use ratatui::{Terminal, backend::TestBackend};
    use retour_database::record::model::Record;

    use super::super::app::{Action, RESERVED_ROWS};

    const NOW: i64 = 1_710_084_600;

    fn record(id: i64, command_line: &str, secs_ago: i64, exit_status: i64) -> Record {
        let (command, arguments) = command_line
            .split_once(' ')
            .unwrap_or((command_line, ""));
        Record::builder()
            .id(id)
            .timestamp(OffsetDateTime::from_unix_timestamp(NOW - secs_ago).unwrap())
            .command(command)
            .arguments(arguments)
            .exit_status(exit_status)
            .build()
    }

    fn sample() -> Vec<Record> {
        vec![
            record(1, "git status", 5, 0),
            record(2, "make build", 120, 2),
            record(3, "ls -la", 3 * 3600, 0),
            record(4, "cargo test", 4 * 86400, 101),
        ]
    }

    /// Render `app` into a `width` x `height` terminal and return the rows
    /// with trailing blanks removed.
    fn render(app: &mut SearchApp, width: u16, height: u16) -> (String, Option<Position>) {
        let _ = app.update(Action::Resize(height));
        let theme = Theme::default();
        let view = SearchView {
            app,
            theme: &theme,
            now: OffsetDateTime::from_unix_timestamp(NOW).unwrap(),
        };

        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut cursor = None;
        terminal
            .draw(|frame| {
                cursor = view.cursor_position(frame.area());
                frame.render_widget_ref(view, frame.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..height)
            .map(|y| {
                let row: String = (0..width).map(|x| buffer[(x, y)].symbol()).collect();
                row.trim_end().to_owned()
            })
            .collect();
        (rows.join("\n").trim_end().to_owned(), cursor)
    }

    #[test]
    fn test_render_full_list() {
        let mut app = SearchApp::new(sample());
        let (screen, cursor) = render(&mut app, 40, 8);
        assert_snapshot!(screen, @r"
> ✓   5s git status
  ✗   2m make build
  ✓   3h ls -la
  ✗   4d cargo test


  4/4
Filter:
");
        assert_eq!(cursor, Some(Position::new(8, 7)));
    }

    #[test]
    fn test_render_filtered_and_scrolled() {
        let mut app = SearchApp::with_query(sample(), "s");
        let _ = app.update(Action::MoveDown);
        let _ = app.update(Action::MoveDown);
        let (screen, cursor) = render(&mut app, 40, 2 + RESERVED_ROWS);
        assert_snapshot!(screen, @r"
  ✓   3h ls -la
> ✗   4d cargo test
  3/4
Filter: s
");
        assert_eq!(cursor, Some(Position::new(9, 3)));
    }

    #[test]
    fn test_render_cursor_inside_filter() {
        let mut app = SearchApp::with_query(sample(), "make");
        let _ = app.update(Action::Home);
        let _ = app.update(Action::CursorRight);
        let (screen, cursor) = render(&mut app, 40, 4);
        assert_snapshot!(screen, @r"
> ✗   2m make build

  1/4
Filter: make
");
        assert_eq!(cursor, Some(Position::new(9, 3)));
    }

    #[test]
    fn test_render_no_matches() {
        let mut app = SearchApp::with_query(sample(), "zzz");
        let (screen, _) = render(&mut app, 30, 3);
        assert_eq!(screen, "\n  0/4\nFilter: zzz");
    }

    #[test]
    fn test_render_window_too_small() {
        let mut app = SearchApp::new(sample());
        let (screen, cursor) = render(&mut app, 30, RESERVED_ROWS);
        assert_snapshot!(screen, @"Window too small");
        assert_eq!(cursor, None);
    }
}
