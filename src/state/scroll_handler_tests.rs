//! Tests for scroll_handler module.

use super::*;

fn at(offset: usize) -> ScrollState {
    ScrollState {
        vertical_offset: offset,
        horizontal_offset: 0,
    }
}

#[test]
fn scroll_down_moves_one_row() {
    let result = handle_scroll_action(at(0), KeyAction::ScrollDown, 10, 100);
    assert_eq!(result.vertical_offset, 1);
}

#[test]
fn scroll_down_clamps_at_last_page() {
    let result = handle_scroll_action(at(90), KeyAction::ScrollDown, 10, 100);
    assert_eq!(result.vertical_offset, 90);
}

#[test]
fn scroll_up_saturates_at_zero() {
    let result = handle_scroll_action(at(0), KeyAction::ScrollUp, 10, 100);
    assert_eq!(result.vertical_offset, 0);
}

#[test]
fn page_down_moves_by_viewport() {
    let result = handle_scroll_action(at(5), KeyAction::PageDown, 10, 100);
    assert_eq!(result.vertical_offset, 15);
}

#[test]
fn page_up_moves_by_viewport() {
    let result = handle_scroll_action(at(15), KeyAction::PageUp, 10, 100);
    assert_eq!(result.vertical_offset, 5);
}

#[test]
fn top_and_bottom_jump() {
    let bottom = handle_scroll_action(at(3), KeyAction::ScrollToBottom, 10, 100);
    assert_eq!(bottom.vertical_offset, 90);
    let top = handle_scroll_action(bottom, KeyAction::ScrollToTop, 10, 100);
    assert_eq!(top.vertical_offset, 0);
}

#[test]
fn content_shorter_than_viewport_never_scrolls() {
    for action in [
        KeyAction::ScrollDown,
        KeyAction::PageDown,
        KeyAction::ScrollToBottom,
    ] {
        let result = handle_scroll_action(at(0), action, 10, 4);
        assert_eq!(result.vertical_offset, 0, "{action:?}");
    }
}

#[test]
fn stale_offset_is_clamped_after_content_shrinks() {
    let result = handle_scroll_action(at(500), KeyAction::ScrollUp, 10, 20);
    assert_eq!(result.vertical_offset, 9);
}

#[test]
fn horizontal_scroll_steps_and_saturates() {
    let right = handle_scroll_action(at(0), KeyAction::ScrollRight, 10, 100);
    assert_eq!(right.horizontal_offset, HORIZONTAL_STEP);
    let left = handle_scroll_action(right, KeyAction::ScrollLeft, 10, 100);
    assert_eq!(left.horizontal_offset, 0);
    let left = handle_scroll_action(left, KeyAction::ScrollLeft, 10, 100);
    assert_eq!(left.horizontal_offset, 0);
}

#[test]
fn non_scroll_action_is_noop() {
    let start = at(7);
    let result = handle_scroll_action(start, KeyAction::ToggleWrap, 10, 100);
    assert_eq!(result, start);
}
