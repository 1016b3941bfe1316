//! Application state and transitions.
//!
//! AppState is the root UI state: which widget has focus, the three input
//! fields and overlay visibility. Search results live in the controller's
//! `ViewState`; scroll position lives with the log view.

use crate::model::SearchInput;
use crate::state::input_field::InputField;

// ===== AppState =====

/// UI state outside of search results. Pure data, no side effects.
///
/// # State Transitions
///
/// - Focus: Term → From → To → Refresh → Log → Term (via `cycle_focus`)
/// - Focus: reverse order (via `cycle_focus_back`)
/// - Help: hidden ⇄ visible (via `toggle_help`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Which widget currently receives keyboard input.
    pub focus: FocusPane,

    /// Free-text search term.
    pub term: InputField,

    /// Lower time bound text.
    pub from: InputField,

    /// Upper time bound text.
    pub to: InputField,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,
}

impl AppState {
    /// State with focus on the search field and help hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the input fields pre-filled (e.g. from the command line).
    pub fn with_inputs(input: &SearchInput) -> Self {
        Self {
            term: InputField::with_text(input.term.clone()),
            from: InputField::with_text(input.from_text.clone()),
            to: InputField::with_text(input.to_text.clone()),
            ..Self::default()
        }
    }

    /// Snapshot of the three fields for a search.
    pub fn search_input(&self) -> SearchInput {
        SearchInput::new(self.term.text(), self.from.text(), self.to.text())
    }

    /// The text field that has focus, if focus is on one.
    pub fn focused_field_mut(&mut self) -> Option<&mut InputField> {
        match self.focus {
            FocusPane::Term => Some(&mut self.term),
            FocusPane::From => Some(&mut self.from),
            FocusPane::To => Some(&mut self.to),
            FocusPane::Refresh | FocusPane::Log => None,
        }
    }

    /// Move focus to the next pane.
    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus to the previous pane.
    pub fn cycle_focus_back(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Show or hide the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

// ===== FocusPane =====

/// Which widget has focus. Sum type - exactly one.
///
/// Input fields consume printable keys as text; the log view maps keys
/// through the configured key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Search term field.
    #[default]
    Term,
    /// Lower time bound field.
    From,
    /// Upper time bound field.
    To,
    /// The Refresh button. Enter or Space runs a search.
    Refresh,
    /// The log view. Scrolling and toggle keys apply.
    Log,
}

impl FocusPane {
    /// Focus order, as cycled by Tab.
    pub const ORDER: [FocusPane; 5] = [
        FocusPane::Term,
        FocusPane::From,
        FocusPane::To,
        FocusPane::Refresh,
        FocusPane::Log,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Pane after this one, wrapping around.
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Pane before this one, wrapping around.
    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// True for the three text inputs.
    pub fn is_text_input(self) -> bool {
        matches!(self, FocusPane::Term | FocusPane::From | FocusPane::To)
    }
}
