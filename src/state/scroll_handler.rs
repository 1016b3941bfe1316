//! Log view scrolling keyboard action handler.
//!
//! Pure functions that transform a [`ScrollState`] in response to scroll actions.
//! Callers supply the viewport height and the content height (in rendered
//! rows) so the offsets stay clamped.

use crate::model::KeyAction;

/// Columns moved per horizontal scroll step.
pub const HORIZONTAL_STEP: usize = 4;

/// Scroll position of the log view.
///
/// # Invariants
///
/// - `vertical_offset <= content_height - viewport_height` after every
///   [`handle_scroll_action`] (0 when the content fits)
/// - `horizontal_offset` only matters while wrapping is off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Rows scrolled down from the top.
    pub vertical_offset: usize,
    /// Columns scrolled right from the left edge.
    pub horizontal_offset: usize,
}

impl ScrollState {
    /// Move up by `amount` rows, stopping at the top.
    pub fn scroll_up(&mut self, amount: usize) {
        self.vertical_offset = self.vertical_offset.saturating_sub(amount);
    }

    /// Scroll down by amount, clamped to max.
    pub fn scroll_down(&mut self, amount: usize, max: usize) {
        self.vertical_offset = self.vertical_offset.saturating_add(amount).min(max);
    }

    /// Move left by `amount` columns, stopping at column 0.
    pub fn scroll_left(&mut self, amount: usize) {
        self.horizontal_offset = self.horizontal_offset.saturating_sub(amount);
    }

    /// Move right by `amount` columns.
    pub fn scroll_right(&mut self, amount: usize) {
        self.horizontal_offset = self.horizontal_offset.saturating_add(amount);
    }
}

/// Largest valid vertical offset.
pub fn max_offset(content_height: usize, viewport_height: usize) -> usize {
    content_height.saturating_sub(viewport_height)
}

/// Handle a scroll keyboard action.
///
/// # Arguments
/// * `scroll` - Current scroll position
/// * `action` - The action to apply; non-scroll actions are no-ops
/// * `viewport_height` - Visible rows (page size)
/// * `content_height` - Total rendered rows
///
/// Returns the new position with the vertical offset clamped.
pub fn handle_scroll_action(
    mut scroll: ScrollState,
    action: KeyAction,
    viewport_height: usize,
    content_height: usize,
) -> ScrollState {
    let max = max_offset(content_height, viewport_height);
    // Content may have shrunk since the last action.
    scroll.vertical_offset = scroll.vertical_offset.min(max);

    match action {
        KeyAction::ScrollUp => scroll.scroll_up(1),
        KeyAction::ScrollDown => scroll.scroll_down(1, max),
        KeyAction::PageUp => scroll.scroll_up(viewport_height.max(1)),
        KeyAction::PageDown => scroll.scroll_down(viewport_height.max(1), max),
        KeyAction::ScrollToTop => scroll.vertical_offset = 0,
        KeyAction::ScrollToBottom => scroll.vertical_offset = max,
        KeyAction::ScrollLeft => scroll.scroll_left(HORIZONTAL_STEP),
        KeyAction::ScrollRight => scroll.scroll_right(HORIZONTAL_STEP),
        _ => {}
    }

    scroll
}

// ===== Tests =====

#[cfg(test)]
#[path = "scroll_handler_tests.rs"]
mod tests;
