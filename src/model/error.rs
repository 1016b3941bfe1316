//! Error types for gbana.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?`
//! and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`DateParseError`] - A from/to bound could not be turned into a timestamp
//! - [`SourceError`] - The log backend failed
//!   - [`BackendError`] - Non-zero exit status or launch failure, carries raw diagnostic text
//!   - [`MalformedResultError`] - Zero exit status but the payload is not a JSON array
//! - [`AppError`] - Top-level wrapper for process startup (config, logging, terminal)
//!
//! # Error Recovery Strategy
//!
//! None of the search errors are fatal. A `DateParseError` aborts the search before
//! anything is dispatched and is shown as a single notice line; a `SourceError`
//! replaces the displayed lines with its diagnostic text. The search state machine
//! always returns to idle and nothing is retried.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::fmt;
use thiserror::Error;

/// Top-level application error.
///
/// Only produced while starting up or tearing down the terminal. Everything that can
/// go wrong during a search is recovered locally by the controller.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Which of the two time-range inputs a [`DateParseError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    /// The lower bound (`timestamp >= ...`).
    From,
    /// The upper bound (`timestamp <= ...`).
    To,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::From => f.write_str("from"),
            DateField::To => f.write_str("to"),
        }
    }
}

/// User-supplied date text could not be parsed into a timestamp.
///
/// The unparsable bound is never dropped silently: the whole build fails and names
/// the offending field.
///
/// # Examples
///
/// ```
/// use gbana::model::{DateField, DateParseError};
///
/// let err = DateParseError::new(DateField::To, "not a date");
/// assert_eq!(err.to_string(), "could not parse 'to' date: \"not a date\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse '{field}' date: \"{input}\"")]
pub struct DateParseError {
    /// The field that failed.
    pub field: DateField,
    /// The text the user typed, as given to the parser.
    pub input: String,
}

impl DateParseError {
    /// Error for `field` whose text was `input`.
    pub fn new(field: DateField, input: impl Into<String>) -> Self {
        Self {
            field,
            input: input.into(),
        }
    }
}

/// The backend reported failure.
///
/// Displays as the raw diagnostic text so it can be shown verbatim as a log line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{diagnostic}")]
pub struct BackendError {
    /// Combined stdout/stderr of the backend invocation.
    pub diagnostic: String,
}

impl BackendError {
    /// Backend error carrying `diagnostic` verbatim.
    pub fn new(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: diagnostic.into(),
        }
    }
}

/// The backend reported success but its output could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed backend output: {reason}")]
pub struct MalformedResultError {
    /// Decoder message.
    pub reason: String,
}

impl MalformedResultError {
    /// Decoding failure described by `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure of a single [`LogSource::execute`](crate::source::LogSource::execute) call.
///
/// Both variants are surfaced to the user the same way: one display line holding
/// the error text, replacing the previous results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The backend ran and failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The backend succeeded but its output did not decode.
    #[error(transparent)]
    Malformed(#[from] MalformedResultError),
}

impl SourceError {
    /// Text to show in place of the results.
    pub fn display_line(&self) -> String {
        self.to_string()
    }
}
