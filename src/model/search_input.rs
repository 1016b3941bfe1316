//! Raw user input for one search.

/// The three text inputs at the moment a search is triggered.
///
/// Transient: rebuilt from the input row on every search invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    /// Free-text term matched against the log payload.
    pub term: String,
    /// Lower time bound, natural-language or ISO text.
    pub from_text: String,
    /// Upper time bound, natural-language or ISO text.
    pub to_text: String,
}

impl SearchInput {
    /// Search input from the three fields.
    pub fn new(
        term: impl Into<String>,
        from_text: impl Into<String>,
        to_text: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            from_text: from_text.into(),
            to_text: to_text.into(),
        }
    }

    /// Input with only a search term.
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// True when every field is empty. Whitespace counts as content.
    pub fn is_blank(&self) -> bool {
        self.term.is_empty() && self.from_text.is_empty() && self.to_text.is_empty()
    }
}
