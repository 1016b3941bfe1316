//! TUI rendering and the terminal event loop.

pub mod constants;
mod help;
pub mod layout;
pub mod log_view;
pub mod search_bar;
mod styles;

pub use help::render_help_overlay;
pub use layout::{render_layout, Screen, ScreenAreas};
pub use log_view::LogViewState;

use crate::config::KeyBindings;
use crate::model::{AppError, KeyAction, SearchInput};
use crate::state::input_field::{
    handle_backspace, handle_char_input, handle_cursor_end, handle_cursor_home,
    handle_cursor_left, handle_cursor_right, handle_delete,
};
use crate::state::{AppState, FocusPane, QueryController, SubmitOutcome};
use constants::TICK_INTERVAL;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    controller: QueryController,
    log_view: LogViewState,
    key_bindings: KeyBindings,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(controller: QueryController, app_state: AppState) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(
            terminal,
            app_state,
            controller,
            KeyBindings::default(),
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Between key events the loop
    /// wakes every tick to pick up a finished search.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(_, _) => self.draw()?,
                    _ => {}
                }
            }

            if self.controller.poll(&mut self.log_view) {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(
        terminal: Terminal<B>,
        app_state: AppState,
        controller: QueryController,
        key_bindings: KeyBindings,
    ) -> Self {
        let log_view = LogViewState::new(controller.view().wrap_enabled());
        Self {
            terminal,
            app_state,
            controller,
            log_view,
            key_bindings,
        }
    }

    /// Submit a search with the current contents of the input row.
    fn submit_search(&mut self) {
        let input = self.app_state.search_input();
        match self.controller.submit(&input, &mut self.log_view) {
            SubmitOutcome::Dispatched(query) => debug!(%query, "Search submitted from UI"),
            SubmitOutcome::Ignored => debug!("Search already running, key ignored"),
            SubmitOutcome::Rejected(err) => warn!(error = %err, "Search inputs rejected"),
            SubmitOutcome::Failed(query) => warn!(%query, "Search could not be started"),
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, whatever has focus
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.help_visible {
            return self.handle_help_key(key);
        }

        match key.code {
            KeyCode::Tab => {
                self.app_state.cycle_focus();
                return false;
            }
            KeyCode::BackTab => {
                self.app_state.cycle_focus_back();
                return false;
            }
            KeyCode::Esc => {
                self.app_state.focus = FocusPane::Log;
                return false;
            }
            _ => {}
        }

        match self.app_state.focus {
            FocusPane::Term | FocusPane::From | FocusPane::To => self.handle_field_key(key),
            FocusPane::Refresh => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.submit_search();
                }
                false
            }
            FocusPane::Log => self.handle_log_key(key),
        }
    }

    /// While help is open only closing it, quitting and scrolling get through.
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc {
            self.app_state.help_visible = false;
            return false;
        }
        match self.key_bindings.get(key) {
            Some(KeyAction::Help) => self.app_state.toggle_help(),
            Some(KeyAction::Quit) => return true,
            _ => {}
        }
        false
    }

    fn handle_field_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Enter {
            self.submit_search();
            return false;
        }

        let Some(field) = self.app_state.focused_field_mut() else {
            return false;
        };
        let current = std::mem::take(field);
        *field = match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                handle_char_input(current, ch)
            }
            KeyCode::Backspace => handle_backspace(current),
            KeyCode::Delete => handle_delete(current),
            KeyCode::Left => handle_cursor_left(current),
            KeyCode::Right => handle_cursor_right(current),
            KeyCode::Home => handle_cursor_home(current),
            KeyCode::End => handle_cursor_end(current),
            _ => current,
        };
        false
    }

    fn handle_log_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.app_state.toggle_help(),
            KeyAction::Refresh => self.submit_search(),
            KeyAction::FocusSearch => self.app_state.focus = FocusPane::Term,
            KeyAction::ToggleWrap => self.controller.toggle_wrap(&mut self.log_view),
            KeyAction::ToggleShowQuery => self.controller.toggle_show_query(),
            KeyAction::ScrollUp
            | KeyAction::ScrollDown
            | KeyAction::ScrollLeft
            | KeyAction::ScrollRight
            | KeyAction::PageUp
            | KeyAction::PageDown
            | KeyAction::ScrollToTop
            | KeyAction::ScrollToBottom => self.log_view.apply_scroll(action),
        }
        false
    }

    /// Render the current frame
    ///
    /// Records the log viewport first so scroll keys clamp against what is on screen.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let areas = ScreenAreas::split(Rect::new(0, 0, size.width.max(1), size.height));
        let inner = areas.log_inner();
        self.log_view.set_viewport(inner.width, inner.height);

        let screen = Screen {
            app_state: &self.app_state,
            view: self.controller.view(),
            log_view: &self.log_view,
            busy: self.controller.is_busy(),
        };
        self.terminal.draw(|frame| render_layout(frame, &screen))?;

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.
//
// DO NOT use these in production code.

#[cfg(test)]
#[allow(dead_code)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Skips terminal initialization so a TestBackend can be used.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        controller: QueryController,
        key_bindings: KeyBindings,
    ) -> Self {
        Self::with_terminal(terminal, app_state, controller, key_bindings)
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn controller(&self) -> &QueryController {
        &self.controller
    }

    pub(crate) fn log_view(&self) -> &LogViewState {
        &self.log_view
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Block until the running search completes or `timeout` passes.
    pub(crate) fn wait_for_search(&mut self, timeout: std::time::Duration) -> bool {
        self.controller.wait(timeout, &mut self.log_view)
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    ///
    /// Provides access to the terminal backend for buffer inspection.
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
/// A search runs immediately when `initial_input` is not blank.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(controller: QueryController, initial_input: SearchInput) -> Result<(), TuiError> {
    let mut app = TuiApp::new(controller, AppState::with_inputs(&initial_input))?;

    if !initial_input.is_blank() {
        info!("Running startup search from command line inputs");
        app.submit_search();
    }

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn tui_error_from_app_error_keeps_message() {
        let app_err = AppError::Terminal(io::Error::other("no tty"));
        let tui_err: TuiError = app_err.into();
        assert_eq!(
            tui_err.to_string(),
            "Application error: Terminal error: no tty"
        );
    }
}
