//! Screen layout: input row, log view, status bar.
//!
//! Pure layout logic plus the top-level render call.

use super::constants::{INPUT_ROW_HEIGHT, STATUS_BAR_HEIGHT};
use super::log_view::{render_log_view, LogViewState};
use super::search_bar::render_search_bar;
use super::{help, styles};
use crate::state::{AppState, FocusPane, ViewState};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// The three stacked areas of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Search, from and to fields plus the refresh button.
    pub input_row: Rect,
    /// Bordered log view.
    pub log_view: Rect,
    /// One-line status bar.
    pub status_bar: Rect,
}

impl ScreenAreas {
    /// Split the full frame area top to bottom.
    pub fn split(area: Rect) -> Self {
        let [input_row, log_view, status_bar] = Layout::vertical([
            Constraint::Length(INPUT_ROW_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);

        Self {
            input_row,
            log_view,
            status_bar,
        }
    }

    /// Area inside the log view border, where lines are drawn.
    pub fn log_inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.log_view)
    }
}

/// Everything one frame needs.
pub struct Screen<'a> {
    /// Focus, inputs and help flag.
    pub app_state: &'a AppState,
    /// Toggles, lines and notice.
    pub view: &'a ViewState,
    /// Render-side log view state.
    pub log_view: &'a LogViewState,
    /// Whether a search is in flight.
    pub busy: bool,
}

/// Render the whole screen, help overlay last.
pub fn render_layout(frame: &mut Frame, screen: &Screen) {
    let areas = ScreenAreas::split(frame.area());

    render_search_bar(
        frame.buffer_mut(),
        areas.input_row,
        screen.app_state,
        screen.busy,
    );
    render_log_view(
        frame,
        areas.log_view,
        screen.log_view,
        screen.app_state.focus == FocusPane::Log,
    );
    render_status_bar(frame, areas.status_bar, screen.view);

    if screen.app_state.help_visible {
        help::render_help_overlay(frame);
    }
}

/// Status bar text: the notice if one is set, toggles and key hints otherwise.
pub fn status_line(view: &ViewState) -> Line<'static> {
    if let Some(notice) = view.notice() {
        return Line::styled(notice.to_string(), styles::NOTICE);
    }

    let on_off = |flag: bool| if flag { "on" } else { "off" };
    Line::styled(
        format!(
            " wrap {} | query {} | Tab: focus | Enter/r: search | ?: help | q: quit",
            on_off(view.wrap_enabled()),
            on_off(view.show_query_enabled()),
        ),
        styles::STATUS,
    )
}

fn render_status_bar(frame: &mut Frame, area: Rect, view: &ViewState) {
    frame.render_widget(Paragraph::new(status_line(view)), area);
}
