//! Search lifecycle state machine.
//!
//! [`QueryController`] owns the [`ViewState`] and enforces that at most one
//! search is in flight. A submitted search is built synchronously, executed on
//! a worker thread, and applied back on the caller's thread by [`poll`] or
//! [`wait`]. The worker never touches the view.
//!
//! ```text
//! Idle --submit--> Building --ok--> Executing --result--> Normalizing --> Idle
//!                     |
//!                     +--DateParseError--> Idle
//! ```
//!
//! [`poll`]: QueryController::poll
//! [`wait`]: QueryController::wait

use crate::integration::normalize;
use crate::model::{BackendError, DateParseError, QueryExpression, RawRecord, SearchInput, SourceError};
use crate::query::{DateParser, NaturalDateParser, QueryBuilder};
use crate::source::{LogSource, DEFAULT_LIMIT};
use crate::state::view_state::{Renderer, ViewState};
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

type SearchResult = Result<Vec<RawRecord>, SourceError>;

/// Where the controller is in the search lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// Nothing running; submits are accepted.
    #[default]
    Idle,
    /// Building the query from the inputs.
    Building,
    /// A worker is running the query.
    Executing,
    /// Turning records into display lines.
    Normalizing,
}

/// What happened to a submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The query was built and handed to a worker.
    Dispatched(QueryExpression),
    /// Another search was in flight; this one was dropped.
    Ignored,
    /// A date bound did not parse; nothing was dispatched.
    Rejected(DateParseError),
    /// The query was built but no worker could be started. The search has
    /// already completed with the failure as its only line.
    Failed(QueryExpression),
}

struct InFlight {
    query: QueryExpression,
    results: Receiver<SearchResult>,
}

/// Drives searches from input to displayed lines.
pub struct QueryController {
    source: Arc<dyn LogSource>,
    builder: QueryBuilder,
    date_parser: Arc<dyn DateParser>,
    limit: usize,
    view: ViewState,
    phase: SearchPhase,
    in_flight: Option<InFlight>,
}

impl std::fmt::Debug for QueryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryController")
            .field("builder", &self.builder)
            .field("limit", &self.limit)
            .field("view", &self.view)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl QueryController {
    /// Controller over `source` with the default builder, date parser and limit.
    pub fn new(source: Arc<dyn LogSource>, view: ViewState) -> Self {
        Self {
            source,
            builder: QueryBuilder::default(),
            date_parser: Arc::new(NaturalDateParser::new()),
            limit: DEFAULT_LIMIT,
            view,
            phase: SearchPhase::Idle,
            in_flight: None,
        }
    }

    /// Use `builder` for query construction.
    pub fn with_builder(mut self, builder: QueryBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Use `parser` for the date bounds.
    pub fn with_date_parser(mut self, parser: Arc<dyn DateParser>) -> Self {
        self.date_parser = parser;
        self
    }

    /// Cap each search at `limit` records.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The owned view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Records requested per search.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// True while a search is between dispatch and completion.
    pub fn is_busy(&self) -> bool {
        self.phase != SearchPhase::Idle
    }

    /// Query of the search currently executing, if any.
    pub fn in_flight_query(&self) -> Option<&QueryExpression> {
        self.in_flight.as_ref().map(|f| &f.query)
    }

    /// Start a search for `input`.
    ///
    /// Dropped (not queued) if a search is already in flight. A date that does
    /// not parse leaves the lines as they are and sets the view's notice instead.
    pub fn submit(&mut self, input: &SearchInput, renderer: &mut dyn Renderer) -> SubmitOutcome {
        if self.phase != SearchPhase::Idle {
            debug!(phase = ?self.phase, "Search ignored, another is in flight");
            return SubmitOutcome::Ignored;
        }

        self.phase = SearchPhase::Building;
        let query = match self.builder.build(input, self.date_parser.as_ref()) {
            Ok(query) => query,
            Err(err) => {
                info!(error = %err, "Search rejected");
                self.view.set_notice(err.to_string());
                self.phase = SearchPhase::Idle;
                return SubmitOutcome::Rejected(err);
            }
        };

        self.view.clear_notice();
        self.view.set_loading(true, renderer);
        self.phase = SearchPhase::Executing;

        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let worker_query = query.clone();
        let limit = self.limit;
        info!(query = %query, limit, "Search dispatched");

        let spawned = thread::Builder::new()
            .name("gbana-search".to_string())
            .spawn(move || {
                let result = source.execute(&worker_query, limit);
                // Receiver gone means the controller was dropped; nothing to report to.
                let _ = tx.send(result);
            })
            .map(drop);

        self.track_worker(query, rx, spawned, renderer)
    }

    /// Record the worker for `query`, or complete at once if it never started.
    fn track_worker(
        &mut self,
        query: QueryExpression,
        results: Receiver<SearchResult>,
        spawned: io::Result<()>,
        renderer: &mut dyn Renderer,
    ) -> SubmitOutcome {
        self.in_flight = Some(InFlight {
            query: query.clone(),
            results,
        });

        match spawned {
            Ok(()) => SubmitOutcome::Dispatched(query),
            Err(e) => {
                warn!(error = %e, "Could not start search worker");
                let err = BackendError::new(format!("failed to start search: {e}"));
                self.complete(Err(err.into()), renderer);
                SubmitOutcome::Failed(query)
            }
        }
    }

    /// Apply a finished search, if there is one. Never blocks.
    ///
    /// Returns true when the view changed.
    pub fn poll(&mut self, renderer: &mut dyn Renderer) -> bool {
        let Some(flight) = &self.in_flight else {
            return false;
        };
        let result = match flight.results.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(worker_vanished()),
        };
        self.complete(result, renderer);
        true
    }

    /// Like [`poll`](Self::poll) but blocks up to `timeout` for the result.
    pub fn wait(&mut self, timeout: Duration, renderer: &mut dyn Renderer) -> bool {
        let Some(flight) = &self.in_flight else {
            return false;
        };
        let result = match flight.results.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => return false,
            Err(RecvTimeoutError::Disconnected) => Err(worker_vanished()),
        };
        self.complete(result, renderer);
        true
    }

    /// Flip line wrapping on the owned view.
    pub fn toggle_wrap(&mut self, renderer: &mut dyn Renderer) {
        self.view.toggle_wrap(renderer);
    }

    /// Flip query echoing. Takes effect when the next search completes.
    pub fn toggle_show_query(&mut self) {
        self.view.toggle_show_query();
    }

    fn complete(&mut self, result: SearchResult, renderer: &mut dyn Renderer) {
        let Some(flight) = self.in_flight.take() else {
            return;
        };
        self.phase = SearchPhase::Normalizing;
        self.view.set_loading(false, renderer);

        let records = match result {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "Search failed");
                vec![RawRecord::Text(err.display_line())]
            }
        };
        let echo = self
            .view
            .show_query_enabled()
            .then(|| flight.query.as_str());
        let lines = normalize(records, echo);
        info!(lines = lines.len(), "Search completed");

        self.view.set_lines(lines, renderer);
        self.phase = SearchPhase::Idle;
    }
}

fn worker_vanished() -> SourceError {
    BackendError::new("search worker exited without a result").into()
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
