//! Displayed-results state and its rendering notifications.
//!
//! [`ViewState`] is the single source of truth for what the log view shows.
//! Every mutation that changes what is on screen notifies a [`Renderer`]
//! explicitly; nothing is observed implicitly.

/// Rendering collaborator notified of view changes.
pub trait Renderer {
    /// Replace the displayed text with `lines`, in order.
    fn set_text(&mut self, lines: &[String]);
    /// Switch line wrapping on or off.
    fn set_wrap(&mut self, wrap: bool);
    /// Show or hide the in-flight indicator.
    fn set_loading(&mut self, loading: bool);
}

/// Renderer that ignores every notification.
///
/// Used where nothing is drawn (headless printing).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn set_text(&mut self, _lines: &[String]) {}
    fn set_wrap(&mut self, _wrap: bool) {}
    fn set_loading(&mut self, _loading: bool) {}
}

/// What the log view displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    lines: Vec<String>,
    wrap_enabled: bool,
    show_query_enabled: bool,
    loading: bool,
    notice: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ViewState {
    /// Empty view with the given toggle settings.
    pub fn new(wrap_enabled: bool, show_query_enabled: bool) -> Self {
        Self {
            lines: Vec::new(),
            wrap_enabled,
            show_query_enabled,
            loading: false,
            notice: None,
        }
    }

    /// Lines of the last completed search.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether long lines wrap.
    pub fn wrap_enabled(&self) -> bool {
        self.wrap_enabled
    }

    /// Whether the next completed search echoes its query.
    pub fn show_query_enabled(&self) -> bool {
        self.show_query_enabled
    }

    /// Whether a search is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Single diagnostic line shown outside the log view, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Replace all lines at once and push them to the renderer.
    pub fn set_lines(&mut self, lines: Vec<String>, renderer: &mut dyn Renderer) {
        self.lines = lines;
        renderer.set_text(&self.lines);
    }

    /// Flip line wrapping. Lines are untouched.
    pub fn toggle_wrap(&mut self, renderer: &mut dyn Renderer) {
        self.wrap_enabled = !self.wrap_enabled;
        renderer.set_wrap(self.wrap_enabled);
    }

    /// Flip query echoing.
    ///
    /// Nothing is re-rendered: the new value is read when the next search
    /// completes, so the current lines keep (or lack) their echo line.
    pub fn toggle_show_query(&mut self) {
        self.show_query_enabled = !self.show_query_enabled;
    }

    /// Set the in-flight flag. Lines are untouched.
    pub fn set_loading(&mut self, loading: bool, renderer: &mut dyn Renderer) {
        self.loading = loading;
        renderer.set_loading(loading);
    }

    /// Show a one-line message in the status bar.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Drop the status bar message.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
