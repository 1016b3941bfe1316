//! Pure core integration functions.
//!
//! Turns raw backend records into the ordered display lines the log view shows,
//! and wires resolved configuration into a ready [`QueryController`].

use crate::config::ResolvedConfig;
use crate::model::RawRecord;
use crate::query::QueryBuilder;
use crate::source::{CommandInvoker, CommandLogSource, LogSource};
use crate::state::{QueryController, ViewState};
use std::sync::Arc;

/// Normalize raw records into display lines.
///
/// This is a pure function that:
/// - puts `echo_query` first when present, whatever it contains
/// - maps `Text` and `Payload` records to their text
/// - skips `Opaque` records
///
/// Arrival order is preserved and nothing is deduplicated, so the output has at
/// most `records.len()` lines plus one for the echo.
pub fn normalize(records: Vec<RawRecord>, echo_query: Option<&str>) -> Vec<String> {
    let mut lines = Vec::with_capacity(records.len() + usize::from(echo_query.is_some()));

    if let Some(query) = echo_query {
        lines.push(query.to_string());
    }

    for record in records {
        match record {
            RawRecord::Text(text) | RawRecord::Payload(text) => lines.push(text),
            RawRecord::Opaque => {}
        }
    }

    lines
}

/// Controller that shells out to the configured backend program.
///
/// Initial toggles come from `line_wrap` and `show_query`.
pub fn controller_from_config(config: &ResolvedConfig) -> QueryController {
    let invoker = CommandInvoker::new(config.program.clone(), config.project.clone());
    let source: Arc<dyn LogSource> =
        Arc::new(CommandLogSource::new(invoker, config.payload_field.clone()));

    QueryController::new(source, ViewState::new(config.line_wrap, config.show_query))
        .with_builder(QueryBuilder::new(config.query_syntax, config.payload_field.clone()))
        .with_limit(config.limit)
}
