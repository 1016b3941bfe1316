//! Single-line text input (pure state transitions).
//!
//! Backs the term, from and to fields of the input row.
//! All functions are pure - no side effects, testable without TUI.

/// Text plus a cursor measured in characters (not bytes).
///
/// # Invariants
///
/// - `cursor <= text.chars().count()`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    text: String,
    cursor: usize,
}

impl InputField {
    /// Field holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Insert a character at the cursor and advance the cursor.
pub fn handle_char_input(mut field: InputField, ch: char) -> InputField {
    let at = field.byte_index(field.cursor);
    field.text.insert(at, ch);
    field.cursor += 1;
    field
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut field: InputField) -> InputField {
    if field.cursor > 0 {
        let at = field.byte_index(field.cursor - 1);
        field.text.remove(at);
        field.cursor -= 1;
    }
    field
}

/// Delete the character under the cursor. No-op at the end.
pub fn handle_delete(mut field: InputField) -> InputField {
    if field.cursor < field.char_len() {
        let at = field.byte_index(field.cursor);
        field.text.remove(at);
    }
    field
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut field: InputField) -> InputField {
    field.cursor = field.cursor.saturating_sub(1);
    field
}

/// Move cursor right by one position. Saturates at the text length.
pub fn handle_cursor_right(mut field: InputField) -> InputField {
    field.cursor = (field.cursor + 1).min(field.char_len());
    field
}

/// Move the cursor to the start.
pub fn handle_cursor_home(mut field: InputField) -> InputField {
    field.cursor = 0;
    field
}

/// Move the cursor past the last char.
pub fn handle_cursor_end(mut field: InputField) -> InputField {
    field.cursor = field.char_len();
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputField {
        s.chars().fold(InputField::default(), handle_char_input)
    }

    #[test]
    fn typing_appends_and_advances_cursor() {
        let field = typed("boot");
        assert_eq!(field.text(), "boot");
        assert_eq!(field.cursor(), 4);
    }

    #[test]
    fn insert_in_middle() {
        let field = handle_cursor_left(handle_cursor_left(typed("bt")));
        let field = handle_cursor_right(field);
        let field = handle_char_input(handle_char_input(field, 'o'), 'o');
        assert_eq!(field.text(), "boot");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let field = handle_cursor_home(typed("ab"));
        let field = handle_backspace(field);
        assert_eq!(field.text(), "ab");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn backspace_removes_previous_char() {
        let field = handle_backspace(typed("abc"));
        assert_eq!(field.text(), "ab");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let field = handle_delete(handle_cursor_home(typed("abc")));
        assert_eq!(field.text(), "bc");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn delete_at_end_is_noop() {
        let field = handle_delete(typed("abc"));
        assert_eq!(field.text(), "abc");
    }

    #[test]
    fn cursor_movement_saturates() {
        let field = handle_cursor_right(typed("a"));
        assert_eq!(field.cursor(), 1);
        let field = handle_cursor_left(handle_cursor_left(field));
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn multibyte_characters_are_edited_whole() {
        let field = typed("héllo");
        assert_eq!(field.cursor(), 5);
        let field = handle_cursor_left(handle_cursor_left(handle_cursor_left(field)));
        let field = handle_backspace(field);
        assert_eq!(field.text(), "hllo");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn with_text_puts_cursor_at_end() {
        let field = InputField::with_text("2024-01-01");
        assert_eq!(field.cursor(), 10);
        assert_eq!(handle_cursor_end(handle_cursor_home(field.clone())), field);
    }
}
