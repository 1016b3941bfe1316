//! Tests for the search controller.
//!
//! Sources here are in-process fakes; end-to-end runs through a
//! `CommandLogSource` live in tests/end_to_end.rs.

use super::*;
use crate::model::{DateField, QuerySyntax, DEFAULT_PAYLOAD_FIELD};
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const WAIT: Duration = Duration::from_secs(5);

// ===== Test Helpers =====

/// Returns a fixed result immediately.
struct InstantSource {
    result: SearchResult,
    calls: AtomicUsize,
}

impl InstantSource {
    fn new(result: SearchResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }
}

impl LogSource for InstantSource {
    fn execute(&self, _query: &QueryExpression, _limit: usize) -> SearchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Blocks inside `execute` until the test releases it.
struct GatedSource {
    calls: AtomicUsize,
    gate: Mutex<Receiver<()>>,
    result: SearchResult,
}

impl GatedSource {
    fn new(result: SearchResult) -> (Arc<Self>, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let source = Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Mutex::new(rx),
            result,
        });
        (source, tx)
    }
}

impl LogSource for GatedSource {
    fn execute(&self, _query: &QueryExpression, _limit: usize) -> SearchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.gate.lock().unwrap().recv();
        self.result.clone()
    }
}

struct PanickingSource;

impl LogSource for PanickingSource {
    fn execute(&self, _query: &QueryExpression, _limit: usize) -> SearchResult {
        panic!("backend exploded");
    }
}

/// Renderer that records every notification in order.
#[derive(Debug, Default)]
struct Recording {
    texts: Vec<Vec<String>>,
    wraps: Vec<bool>,
    loadings: Vec<bool>,
}

impl Renderer for Recording {
    fn set_text(&mut self, lines: &[String]) {
        self.texts.push(lines.to_vec());
    }
    fn set_wrap(&mut self, wrap: bool) {
        self.wraps.push(wrap);
    }
    fn set_loading(&mut self, loading: bool) {
        self.loadings.push(loading);
    }
}

fn controller(source: Arc<dyn LogSource>) -> QueryController {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    QueryController::new(source, ViewState::default())
        .with_builder(QueryBuilder::new(QuerySyntax::Plain, DEFAULT_PAYLOAD_FIELD))
        .with_date_parser(Arc::new(NaturalDateParser::with_now(now)))
}

fn payloads(items: &[&str]) -> SearchResult {
    Ok(items
        .iter()
        .map(|s| RawRecord::Payload(s.to_string()))
        .collect())
}

// ===== submit Tests =====

#[test]
fn submit_dispatches_built_query_and_sets_loading() {
    let (source, release) = GatedSource::new(payloads(&["a"]));
    let mut ctl = controller(source.clone());
    let mut r = Recording::default();

    let outcome = ctl.submit(&SearchInput::term("boot"), &mut r);

    match outcome {
        SubmitOutcome::Dispatched(query) => {
            assert_eq!(query.as_str(), "payload contains \"boot\"")
        }
        other => panic!("expected dispatch, got {other:?}"),
    }
    assert_eq!(ctl.phase(), SearchPhase::Executing);
    assert!(ctl.view().loading());
    assert_eq!(r.loadings, vec![true]);
    assert_eq!(
        ctl.in_flight_query().map(QueryExpression::as_str),
        Some("payload contains \"boot\"")
    );

    release.send(()).unwrap();
    assert!(ctl.wait(WAIT, &mut r));
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let (source, release) = GatedSource::new(payloads(&["only once"]));
    let mut ctl = controller(source.clone());
    let mut r = Recording::default();

    assert!(matches!(
        ctl.submit(&SearchInput::term("a"), &mut r),
        SubmitOutcome::Dispatched(_)
    ));
    assert_eq!(
        ctl.submit(&SearchInput::term("b"), &mut r),
        SubmitOutcome::Ignored
    );

    release.send(()).unwrap();
    assert!(ctl.wait(WAIT, &mut r));

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(ctl.view().lines(), &["only once"]);
    assert_eq!(ctl.phase(), SearchPhase::Idle);
}

#[test]
fn unparseable_date_is_rejected_without_dispatch() {
    let source = InstantSource::new(payloads(&["x"]));
    let mut ctl = controller(source.clone());
    let mut r = Recording::default();

    let outcome = ctl.submit(&SearchInput::new("", "2024-01-01", "not a date"), &mut r);

    match outcome {
        SubmitOutcome::Rejected(err) => assert_eq!(err.field, DateField::To),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(ctl.phase(), SearchPhase::Idle);
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert!(!ctl.view().loading());
    assert!(r.loadings.is_empty());
    assert!(r.texts.is_empty());
    let notice = ctl.view().notice().unwrap_or_default();
    assert!(notice.contains("'to'"), "got: {notice}");
    assert!(!notice.contains('\n'));
}

#[test]
fn rejection_keeps_previous_lines() {
    let source = InstantSource::new(payloads(&["kept"]));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("x"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));
    ctl.submit(&SearchInput::new("", "bad", ""), &mut r);

    assert_eq!(ctl.view().lines(), &["kept"]);
}

#[test]
fn dispatch_clears_previous_notice() {
    let source = InstantSource::new(payloads(&[]));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::new("", "bad", ""), &mut r);
    assert!(ctl.view().notice().is_some());

    ctl.submit(&SearchInput::term("ok"), &mut r);
    assert_eq!(ctl.view().notice(), None);
    assert!(ctl.wait(WAIT, &mut r));
}

#[test]
fn submit_is_accepted_again_after_completion() {
    let source = InstantSource::new(payloads(&["x"]));
    let mut ctl = controller(source.clone());
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("a"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));
    assert!(matches!(
        ctl.submit(&SearchInput::term("b"), &mut r),
        SubmitOutcome::Dispatched(_)
    ));
    assert!(ctl.wait(WAIT, &mut r));
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

// ===== poll / wait Tests =====

#[test]
fn poll_without_search_is_noop() {
    let mut ctl = controller(InstantSource::new(payloads(&[])));
    let mut r = Recording::default();
    assert!(!ctl.poll(&mut r));
    assert!(!ctl.wait(Duration::from_millis(1), &mut r));
}

#[test]
fn poll_does_not_block_while_executing() {
    let (source, release) = GatedSource::new(payloads(&["late"]));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("a"), &mut r);
    assert!(!ctl.poll(&mut r));
    assert_eq!(ctl.phase(), SearchPhase::Executing);

    release.send(()).unwrap();
    assert!(ctl.wait(WAIT, &mut r));
    assert!(!ctl.poll(&mut r));
}

#[test]
fn completion_clears_loading_then_sets_lines() {
    let source = InstantSource::new(payloads(&["boot ok"]));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("boot"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));

    assert_eq!(r.loadings, vec![true, false]);
    assert_eq!(r.texts, vec![vec!["boot ok".to_string()]]);
    assert!(!ctl.view().loading());
    assert!(!ctl.is_busy());
}

#[test]
fn opaque_records_are_dropped() {
    let source = InstantSource::new(Ok(vec![
        RawRecord::Payload("boot ok".into()),
        RawRecord::Opaque,
    ]));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("boot"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));
    assert_eq!(ctl.view().lines(), &["boot ok"]);
}

#[test]
fn backend_error_becomes_single_line() {
    let source = InstantSource::new(Err(BackendError::new("auth expired").into()));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("x"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));

    assert_eq!(ctl.view().lines(), &["auth expired"]);
    assert!(!ctl.view().loading());
    assert_eq!(ctl.phase(), SearchPhase::Idle);
}

#[test]
fn panicking_worker_is_reported_as_backend_error() {
    let mut ctl = controller(Arc::new(PanickingSource));
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("x"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));

    assert_eq!(
        ctl.view().lines(),
        &["search worker exited without a result"]
    );
    assert_eq!(ctl.phase(), SearchPhase::Idle);
}

#[test]
fn limit_is_passed_to_source() {
    struct LimitProbe(AtomicUsize);
    impl LogSource for LimitProbe {
        fn execute(&self, _query: &QueryExpression, limit: usize) -> SearchResult {
            self.0.store(limit, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    let probe = Arc::new(LimitProbe(AtomicUsize::new(0)));
    let mut ctl = controller(probe.clone()).with_limit(25);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::default(), &mut r);
    assert!(ctl.wait(WAIT, &mut r));
    assert_eq!(probe.0.load(Ordering::SeqCst), 25);
}

// ===== show-query Tests =====

#[test]
fn show_query_echoes_query_as_first_line() {
    let source = InstantSource::new(payloads(&["boot ok"]));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.toggle_show_query();
    ctl.submit(&SearchInput::term("boot"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));

    assert_eq!(
        ctl.view().lines(),
        &["payload contains \"boot\"", "boot ok"]
    );
}

#[test]
fn show_query_toggle_applies_to_next_completion_only() {
    let source = InstantSource::new(payloads(&["a"]));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("a"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));
    ctl.toggle_show_query();

    // Current lines do not gain the echo line.
    assert_eq!(ctl.view().lines(), &["a"]);
    assert_eq!(r.texts.len(), 1);

    ctl.submit(&SearchInput::term("a"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));
    assert_eq!(ctl.view().lines(), &["payload contains \"a\"", "a"]);
}

#[test]
fn show_query_read_at_completion_not_dispatch() {
    let (source, release) = GatedSource::new(payloads(&["a"]));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("a"), &mut r);
    ctl.toggle_show_query();
    release.send(()).unwrap();
    assert!(ctl.wait(WAIT, &mut r));

    assert_eq!(ctl.view().lines(), &["payload contains \"a\"", "a"]);
}

#[test]
fn show_query_echoes_on_backend_error_too() {
    let source = InstantSource::new(Err(BackendError::new("auth expired").into()));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.toggle_show_query();
    ctl.submit(&SearchInput::term("x"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));

    assert_eq!(
        ctl.view().lines(),
        &["payload contains \"x\"", "auth expired"]
    );
}

// ===== wrap Tests =====

#[test]
fn toggle_wrap_twice_leaves_lines_untouched() {
    let source = InstantSource::new(payloads(&["x", "y"]));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("x"), &mut r);
    assert!(ctl.wait(WAIT, &mut r));

    ctl.toggle_wrap(&mut r);
    ctl.toggle_wrap(&mut r);

    assert!(ctl.view().wrap_enabled());
    assert_eq!(r.wraps, vec![false, true]);
    assert_eq!(ctl.view().lines(), &["x", "y"]);
    assert_eq!(r.texts.len(), 1);
}

#[test]
fn toggle_wrap_works_while_loading() {
    let (source, release) = GatedSource::new(payloads(&[]));
    let mut ctl = controller(source);
    let mut r = Recording::default();

    ctl.submit(&SearchInput::term("x"), &mut r);
    ctl.toggle_wrap(&mut r);
    assert!(!ctl.view().wrap_enabled());
    assert!(ctl.view().loading());

    release.send(()).unwrap();
    assert!(ctl.wait(WAIT, &mut r));
}

// ===== Worker start failure =====

#[test]
fn worker_start_failure_completes_at_once() {
    let mut ctl = controller(InstantSource::new(payloads(&["unused"])));
    let mut r = Recording::default();
    let query = QueryExpression::from_clauses(vec!["payload contains \"x\"".to_string()]);
    let (_tx, rx) = mpsc::channel();
    ctl.phase = SearchPhase::Executing;

    let outcome = ctl.track_worker(
        query.clone(),
        rx,
        Err(io::Error::other("no threads left")),
        &mut r,
    );

    assert_eq!(outcome, SubmitOutcome::Failed(query));
    assert!(!ctl.is_busy());
    assert!(ctl.in_flight_query().is_none());
    assert_eq!(ctl.view().lines(), ["failed to start search: no threads left"]);
    assert_eq!(r.loadings, vec![false]);
}

#[test]
fn submit_is_accepted_after_worker_start_failure() {
    let mut ctl = controller(InstantSource::new(payloads(&["ok"])));
    let mut r = Recording::default();
    let (_tx, rx) = mpsc::channel();
    ctl.phase = SearchPhase::Executing;
    ctl.track_worker(
        QueryExpression::from_clauses(Vec::new()),
        rx,
        Err(io::Error::other("no threads left")),
        &mut r,
    );

    let outcome = ctl.submit(&SearchInput::term("ok"), &mut r);

    assert!(matches!(outcome, SubmitOutcome::Dispatched(_)));
    assert!(ctl.wait(WAIT, &mut r));
    assert_eq!(ctl.view().lines(), ["ok"]);
}
