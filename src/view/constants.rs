//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

use std::time::Duration;

/// Height of the input row in lines (border + content).
///
/// Holds the Search, From and To fields and the Refresh button.
pub const INPUT_ROW_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
///
/// Single line for the notice or toggle states and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the `[ Refresh ]` button including its border.
pub const REFRESH_BUTTON_WIDTH: u16 = 13;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// How long the event loop waits for input before checking on a running search.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
