//! Shared styles for the dashboard widgets.

use ratatui::style::{Color, Modifier, Style};

/// Secondary text: hints, placeholders.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Category headers in the help overlay.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Border of the widget that has keyboard focus.
pub const FOCUSED_BORDER: Style = Style::new().fg(Color::Yellow);

/// Border of widgets without focus.
pub const UNFOCUSED_BORDER: Style = Style::new().fg(Color::Gray);

/// Block cursor inside a text field.
pub const CURSOR: Style = Style::new()
    .bg(Color::White)
    .fg(Color::Black)
    .add_modifier(Modifier::BOLD);

/// Log view title while a search is running.
pub const LOADING: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Status bar diagnostic line.
pub const NOTICE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Status bar text when there is no notice.
pub const STATUS: Style = Style::new().fg(Color::Gray);

/// Border style for a widget given whether it has focus.
pub fn border_style(focused: bool) -> Style {
    if focused {
        FOCUSED_BORDER
    } else {
        UNFOCUSED_BORDER
    }
}
