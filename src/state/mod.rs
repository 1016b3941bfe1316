//! UI and search state (pure core plus the search state machine).
//!
//! State transitions are plain functions or methods testable without a TUI.
//! The controller is the only part that touches a thread.

pub mod app_state;
pub mod controller;
pub mod input_field;
pub mod scroll_handler;
pub mod view_state;

// Re-export for convenience
pub use app_state::{AppState, FocusPane};
pub use controller::{QueryController, SearchPhase, SubmitOutcome};
pub use input_field::InputField;
pub use scroll_handler::{handle_scroll_action, ScrollState};
pub use view_state::{NullRenderer, Renderer, ViewState};
