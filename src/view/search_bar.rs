//! Input row: Search, From and To fields plus the Refresh button.

use super::constants::REFRESH_BUTTON_WIDTH;
use super::styles;
use crate::state::{AppState, FocusPane, InputField};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Placeholder shown in an empty, unfocused date field.
pub const DATE_PLACEHOLDER: &str = "e.g. 2h ago, 2024-03-15";

/// One labelled text field.
pub struct TextField<'a> {
    label: &'a str,
    field: &'a InputField,
    focused: bool,
    placeholder: Option<&'a str>,
}

impl<'a> TextField<'a> {
    /// Field labelled `label`, drawn from `field`.
    pub fn new(label: &'a str, field: &'a InputField, focused: bool) -> Self {
        Self {
            label,
            field,
            focused,
            placeholder: None,
        }
    }

    /// Muted text shown while the field is empty.
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

/// Split `text` around the character at `cursor` into (before, at, after).
///
/// Past the end of the text the cursor sits on a blank cell.
fn split_at_cursor(text: &str, cursor: usize) -> (String, String, String) {
    let before: String = text.chars().take(cursor).collect();
    let mut rest = text.chars().skip(cursor);
    let at = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
    let after: String = rest.collect();
    (before, at, after)
}

/// First character to show so the cursor stays inside `width` cells.
fn visible_start(cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    cursor.saturating_sub(width - 1)
}

impl Widget for TextField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border_style(self.focused))
            .title(format!(" {} ", self.label));

        let inner_width = usize::from(block.inner(area).width);
        let text = self.field.text();

        let line = if self.focused {
            let start = visible_start(self.field.cursor(), inner_width);
            let shown: String = text.chars().skip(start).collect();
            let (before, at, after) = split_at_cursor(&shown, self.field.cursor() - start);
            Line::from(vec![
                Span::raw(before),
                Span::styled(at, styles::CURSOR),
                Span::raw(after),
            ])
        } else if text.is_empty() {
            let placeholder = self.placeholder.unwrap_or_default();
            Line::styled(placeholder, styles::MUTED_TEXT)
        } else {
            Line::raw(text)
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

/// The `[ Refresh ]` button.
pub struct RefreshButton {
    focused: bool,
    busy: bool,
}

impl RefreshButton {
    /// Button drawn with focus and busy state.
    pub fn new(focused: bool, busy: bool) -> Self {
        Self { focused, busy }
    }
}

impl Widget for RefreshButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut style = Style::default();
        if self.focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if self.busy {
            style = style.add_modifier(Modifier::DIM);
        }

        Paragraph::new(Line::styled("Refresh", style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(styles::border_style(self.focused)),
            )
            .render(area, buf);
    }
}

/// Areas of the four widgets in the input row, left to right.
pub fn split_input_row(area: Rect) -> [Rect; 4] {
    Layout::horizontal([
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(REFRESH_BUTTON_WIDTH),
    ])
    .areas(area)
}

/// Render the whole input row.
pub fn render_search_bar(buf: &mut Buffer, area: Rect, state: &AppState, busy: bool) {
    let [term_area, from_area, to_area, button_area] = split_input_row(area);

    TextField::new("Search", &state.term, state.focus == FocusPane::Term).render(term_area, buf);
    TextField::new("From", &state.from, state.focus == FocusPane::From)
        .placeholder(DATE_PLACEHOLDER)
        .render(from_area, buf);
    TextField::new("To", &state.to, state.focus == FocusPane::To)
        .placeholder(DATE_PLACEHOLDER)
        .render(to_area, buf);
    RefreshButton::new(state.focus == FocusPane::Refresh, busy).render(button_area, buf);
}
