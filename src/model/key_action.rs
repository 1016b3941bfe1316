//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
///
/// Bindings only apply while the log view has focus; the input row consumes
/// printable keys as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll log view up by one line. Default: k/↑
    ScrollUp,
    /// Scroll log view down by one line. Default: j/↓
    ScrollDown,
    /// Scroll horizontally left when line wrapping disabled. Default: h/←
    ScrollLeft,
    /// Scroll horizontally right when line wrapping disabled. Default: l/→
    ScrollRight,
    /// Scroll up by one page height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first line. Default: g/Home
    ScrollToTop,
    /// Jump to the last line. Default: G/End
    ScrollToBottom,

    // Search
    /// Move focus to the search term field. Default: /
    FocusSearch,
    /// Run a search with the current inputs. Default: r
    Refresh,

    // View toggles
    /// Toggle line wrapping of the log view. Default: w
    ToggleWrap,
    /// Toggle echoing the generated query as the first line of the next result. Default: s
    ToggleShowQuery,

    // Application
    /// Exit the application. Default: q
    Quit,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
}
