//! Log view widget and its render-side state.

use super::styles;
use crate::model::KeyAction;
use crate::state::{handle_scroll_action, Renderer, ScrollState};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Shown in an empty log view before any search has completed.
pub const EMPTY_HINT: &str = "No results. Type a search term and press Enter.";

/// What the log view currently draws.
///
/// Receives [`Renderer`] notifications from the controller's `ViewState`, so
/// it never decides on its own what the lines are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogViewState {
    lines: Vec<String>,
    wrap: bool,
    loading: bool,
    scroll: ScrollState,
    /// Inner size of the last drawn area as (width, height).
    viewport: (u16, u16),
}

impl LogViewState {
    /// Empty view starting with the given wrap setting.
    pub fn new(wrap: bool) -> Self {
        Self {
            wrap,
            ..Self::default()
        }
    }

    /// Lines currently shown.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether long lines wrap.
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Whether a search is running.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Current scroll offsets.
    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    /// Record the inner size of the log area. Called before every draw.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Rows the current lines occupy at the current width.
    ///
    /// Embedded newlines start a new row. Wrapped rows are counted by display
    /// width, which can undercount where the paragraph breaks at a word
    /// boundary.
    pub fn content_height(&self) -> usize {
        let rows = self.lines.iter().flat_map(|line| display_rows(line));
        if !self.wrap {
            return rows.count();
        }
        let width = usize::from(self.viewport.0.max(1));
        rows.map(|row| row.width().div_ceil(width).max(1)).sum()
    }

    /// Apply a scroll action against the last known viewport.
    pub fn apply_scroll(&mut self, action: KeyAction) {
        let viewport_height = usize::from(self.viewport.1);
        self.scroll = handle_scroll_action(
            self.scroll,
            action,
            viewport_height,
            self.content_height(),
        );
        if self.wrap {
            self.scroll.horizontal_offset = 0;
        }
    }
}

/// Split one display line at its embedded newlines.
///
/// Always yields at least one row, so an empty line still takes up space.
fn display_rows(line: &str) -> impl Iterator<Item = &str> {
    line.split('\n').map(|row| row.strip_suffix('\r').unwrap_or(row))
}

impl Renderer for LogViewState {
    fn set_text(&mut self, lines: &[String]) {
        self.lines = lines.to_vec();
        self.scroll = ScrollState::default();
    }

    fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
        self.scroll.horizontal_offset = 0;
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// Block title: a spinner label while loading, the line count otherwise.
pub fn title(state: &LogViewState) -> Line<'static> {
    if state.loading {
        Line::from(vec![
            Span::raw(" Logs "),
            Span::styled("loading… ", styles::LOADING),
        ])
    } else {
        let count = state.lines.len();
        let noun = if count == 1 { "line" } else { "lines" };
        Line::from(format!(" Logs ({} {}) ", count, noun))
    }
}

/// Render the log view into `area`.
pub fn render_log_view(frame: &mut Frame, area: Rect, state: &LogViewState, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused))
        .title(title(state));

    let vertical = u16::try_from(state.scroll.vertical_offset).unwrap_or(u16::MAX);

    if state.lines.is_empty() && !state.loading {
        let hint = Paragraph::new(Line::styled(EMPTY_HINT, styles::MUTED_TEXT)).block(block);
        frame.render_widget(hint, area);
        return;
    }

    let lines: Vec<Line> = state
        .lines
        .iter()
        .flat_map(|l| display_rows(l))
        .map(Line::raw)
        .collect();
    let paragraph = Paragraph::new(lines).block(block);

    let paragraph = if state.wrap {
        paragraph.wrap(Wrap { trim: false }).scroll((vertical, 0))
    } else {
        let horizontal = u16::try_from(state.scroll.horizontal_offset).unwrap_or(u16::MAX);
        paragraph.scroll((vertical, horizontal))
    };

    frame.render_widget(paragraph, area);
}
