//! Query construction (pure).
//!
//! Turns a [`SearchInput`] into a [`QueryExpression`]. Date text is resolved
//! through a [`DateParser`] collaborator so tests can pin the clock.

pub mod date;

pub use date::{DateParser, NaturalDateParser};

use crate::model::{
    Clause, DateField, DateParseError, QueryExpression, QuerySyntax, SearchInput,
    DEFAULT_PAYLOAD_FIELD,
};

/// Builds backend queries in one fixed syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    syntax: QuerySyntax,
    payload_field: String,
}

impl Default for QueryBuilder {
    /// Cloud Logging syntax against `textPayload`, so the term clause reads
    /// `textPayload:"term"`. Use [`QuerySyntax::Plain`] for the backend-neutral
    /// `payload contains "term"` spelling.
    fn default() -> Self {
        Self::new(QuerySyntax::default(), DEFAULT_PAYLOAD_FIELD)
    }
}

impl QueryBuilder {
    /// Builder spelling term clauses in `syntax` against `payload_field`.
    pub fn new(syntax: QuerySyntax, payload_field: impl Into<String>) -> Self {
        Self {
            syntax,
            payload_field: payload_field.into(),
        }
    }

    /// Spelling used for the term clause.
    pub fn syntax(&self) -> QuerySyntax {
        self.syntax
    }

    /// Field the term clause matches.
    pub fn payload_field(&self) -> &str {
        &self.payload_field
    }

    /// Build the query for `input`.
    ///
    /// Clauses are emitted in a fixed order: term, from, to. Empty fields
    /// contribute nothing, so an all-empty input yields the empty expression.
    /// Any other text is content: a whitespace term is searched for, and a
    /// whitespace bound is handed to the parser.
    ///
    /// # Errors
    ///
    /// Returns [`DateParseError`] naming the first bound (from before to) whose
    /// text the parser rejects. No partial query is produced.
    pub fn build(
        &self,
        input: &SearchInput,
        parser: &dyn DateParser,
    ) -> Result<QueryExpression, DateParseError> {
        let mut clauses = Vec::with_capacity(3);

        if !input.term.is_empty() {
            clauses.push(Clause::PayloadContains(input.term.clone()));
        }
        if let Some(ts) = parse_bound(DateField::From, &input.from_text, parser)? {
            clauses.push(Clause::TimestampFrom(ts));
        }
        if let Some(ts) = parse_bound(DateField::To, &input.to_text, parser)? {
            clauses.push(Clause::TimestampTo(ts));
        }

        let rendered = clauses
            .iter()
            .map(|c| c.render(self.syntax, &self.payload_field))
            .collect();
        Ok(QueryExpression::from_clauses(rendered))
    }
}

fn parse_bound(
    field: DateField,
    text: &str,
    parser: &dyn DateParser,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, DateParseError> {
    if text.is_empty() {
        return Ok(None);
    }
    parser
        .parse(text)
        .map(Some)
        .ok_or_else(|| DateParseError::new(field, text))
}
