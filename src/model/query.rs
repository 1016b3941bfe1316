//! Backend query expressions.
//!
//! A [`QueryExpression`] is an ordered list of rendered clause strings joined by
//! `" AND "`. Clauses are built from typed [`Clause`] values and rendered once, at
//! build time, in the backend's [`QuerySyntax`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::fmt;

/// Separator between clauses.
pub const CLAUSE_SEPARATOR: &str = " AND ";

/// Payload field used by Cloud Logging for plain-text entries.
pub const DEFAULT_PAYLOAD_FIELD: &str = "textPayload";

/// How a payload clause is spelled for the backend.
///
/// Timestamp clauses are spelled the same way in both syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuerySyntax {
    /// Cloud Logging filter language: `textPayload:"term"`. The default,
    /// since it is what `gcloud logging read` accepts.
    #[default]
    CloudLogging,
    /// Backend-neutral form: `payload contains "term"`.
    Plain,
}

/// One condition of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// The payload contains the term. The term is inserted verbatim, unescaped.
    PayloadContains(String),
    /// `timestamp >= bound`
    TimestampFrom(DateTime<Utc>),
    /// `timestamp <= bound`
    TimestampTo(DateTime<Utc>),
}

impl Clause {
    /// Render this clause as backend query text.
    pub fn render(&self, syntax: QuerySyntax, payload_field: &str) -> String {
        match self {
            Clause::PayloadContains(term) => match syntax {
                QuerySyntax::CloudLogging => format!("{payload_field}:\"{term}\""),
                QuerySyntax::Plain => format!("payload contains \"{term}\""),
            },
            Clause::TimestampFrom(ts) => format!("timestamp >= \"{}\"", format_timestamp(ts)),
            Clause::TimestampTo(ts) => format!("timestamp <= \"{}\"", format_timestamp(ts)),
        }
    }
}

/// Format a timestamp as ISO-8601 with second precision and an explicit `+00:00` offset.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// A complete, immutable backend query.
///
/// The empty expression matches everything (subject to the backend's own limit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryExpression {
    clauses: Vec<String>,
    text: String,
}

impl QueryExpression {
    /// The expression with no clauses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an expression from already-rendered clauses, keeping their order.
    pub fn from_clauses(clauses: Vec<String>) -> Self {
        let text = clauses.join(CLAUSE_SEPARATOR);
        Self { clauses, text }
    }

    /// Rendered clauses in order.
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    /// True when no clause was produced.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Full query text, clauses joined by `" AND "`.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
