//! Log sources.
//!
//! A [`LogSource`] runs one query against the external backend and hands back
//! raw records. It blocks, and is only ever called from the search worker
//! thread. The production source shells out through a [`BackendInvoker`] and
//! decodes the JSON array printed on stdout.

use crate::model::{BackendError, MalformedResultError, QueryExpression, RawRecord, SourceError};
use serde_json::Value;
use tracing::{debug, warn};

pub mod command;

pub use command::{BackendInvoker, BackendOutput, CommandInvoker, DEFAULT_PROGRAM};

/// Default result cap passed to the backend.
pub const DEFAULT_LIMIT: usize = 500;

/// Executes queries against an external log backend.
pub trait LogSource: Send + Sync {
    /// Run `query`, returning at most `limit` records in backend order.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Backend`] when the backend fails or cannot be started
    /// - [`SourceError::Malformed`] when it succeeds but its output is not a JSON array
    fn execute(&self, query: &QueryExpression, limit: usize) -> Result<Vec<RawRecord>, SourceError>;
}

/// [`LogSource`] backed by a command-line invocation.
#[derive(Debug, Clone)]
pub struct CommandLogSource<I> {
    invoker: I,
    payload_field: String,
}

impl<I: BackendInvoker> CommandLogSource<I> {
    /// Source reading records through `invoker`, taking text from `payload_field`.
    pub fn new(invoker: I, payload_field: impl Into<String>) -> Self {
        Self {
            invoker,
            payload_field: payload_field.into(),
        }
    }

    /// The wrapped invoker.
    pub fn invoker(&self) -> &I {
        &self.invoker
    }
}

impl<I: BackendInvoker> LogSource for CommandLogSource<I> {
    fn execute(&self, query: &QueryExpression, limit: usize) -> Result<Vec<RawRecord>, SourceError> {
        let output = self.invoker.invoke(query.as_str(), limit).map_err(|e| {
            warn!(backend = self.invoker.name(), error = %e, "Backend could not be started");
            BackendError::new(format!("failed to run {}: {e}", self.invoker.name()))
        })?;

        if !output.success {
            let diagnostic = output.combined();
            warn!(backend = self.invoker.name(), %diagnostic, "Backend reported failure");
            return Err(BackendError::new(diagnostic).into());
        }

        let records = parse_records(&output.stdout, &self.payload_field)?;
        debug!(count = records.len(), "Backend returned records");
        Ok(records)
    }
}

/// Decode backend stdout into records.
///
/// Empty (or whitespace-only) output means no matches.
///
/// # Errors
///
/// Returns [`MalformedResultError`] when the text is not valid JSON or the
/// top-level value is not an array.
pub fn parse_records(stdout: &str, payload_field: &str) -> Result<Vec<RawRecord>, MalformedResultError> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value =
        serde_json::from_str(stdout).map_err(|e| MalformedResultError::new(e.to_string()))?;
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| RawRecord::from_json(item, payload_field))
            .collect()),
        other => Err(MalformedResultError::new(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
