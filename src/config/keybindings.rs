//! Keyboard bindings configuration.
//!
//! Only consulted while the log view has focus; text fields take keys as input.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the key code and modifiers are compared; event kind and keyboard
    /// state flags are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Add or replace a binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }

    /// All keys bound to `action`, in no particular order.
    pub fn keys_for(&self, action: KeyAction) -> Vec<KeyEvent> {
        self.bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut kb = Self {
            bindings: HashMap::new(),
        };

        // Vim-style scrolling
        kb.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::ScrollDown);
        kb.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::ScrollUp);
        kb.bind(KeyCode::Char('h'), KeyModifiers::NONE, KeyAction::ScrollLeft);
        kb.bind(KeyCode::Char('l'), KeyModifiers::NONE, KeyAction::ScrollRight);
        kb.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::ScrollToTop);
        // Terminals disagree on whether an upper-case letter carries SHIFT.
        kb.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);
        kb.bind(KeyCode::Char('G'), KeyModifiers::NONE, KeyAction::ScrollToBottom);

        // Arrow and navigation keys
        kb.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp);
        kb.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown);
        kb.bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::ScrollLeft);
        kb.bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::ScrollRight);
        kb.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::ScrollToTop);
        kb.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::ScrollToBottom);

        // Page navigation
        kb.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        kb.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        kb.bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        kb.bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);

        // Search
        kb.bind(KeyCode::Char('/'), KeyModifiers::NONE, KeyAction::FocusSearch);
        kb.bind(KeyCode::Char('r'), KeyModifiers::NONE, KeyAction::Refresh);

        // View toggles
        kb.bind(KeyCode::Char('w'), KeyModifiers::NONE, KeyAction::ToggleWrap);
        kb.bind(KeyCode::Char('s'), KeyModifiers::NONE, KeyAction::ToggleShowQuery);

        // Application controls
        kb.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        kb.bind(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::Help);
        kb.bind(KeyCode::Char('?'), KeyModifiers::SHIFT, KeyAction::Help);

        kb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    #[test]
    fn default_bindings_map_lowercase_w_to_toggle_wrap() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);

        assert_eq!(
            bindings.get(key_event),
            Some(KeyAction::ToggleWrap),
            "Lowercase 'w' should map to ToggleWrap"
        );
    }

    #[test]
    fn default_bindings_map_s_to_toggle_show_query() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(bindings.get(key_event), Some(KeyAction::ToggleShowQuery));
    }

    #[test]
    fn uppercase_g_with_or_without_shift_scrolls_to_bottom() {
        let bindings = KeyBindings::default();
        for modifiers in [KeyModifiers::SHIFT, KeyModifiers::NONE] {
            let key_event = KeyEvent::new(KeyCode::Char('G'), modifiers);
            assert_eq!(bindings.get(key_event), Some(KeyAction::ScrollToBottom));
        }
    }

    #[test]
    fn lookup_ignores_event_kind_and_state() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
            KeyEventState::NUM_LOCK,
        );
        assert_eq!(bindings.get(key_event), Some(KeyAction::Quit));
    }

    #[test]
    fn unbound_key_is_none() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(bindings.get(key_event), None);
    }

    #[test]
    fn bind_replaces_existing_binding() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::Char('r'), KeyModifiers::NONE, KeyAction::Quit);
        let key_event = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(bindings.get(key_event), Some(KeyAction::Quit));
    }

    #[test]
    fn keys_for_lists_every_binding() {
        let bindings = KeyBindings::default();
        let keys = bindings.keys_for(KeyAction::PageDown);
        assert_eq!(keys.len(), 2);
    }
}
