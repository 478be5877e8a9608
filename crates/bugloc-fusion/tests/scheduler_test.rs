//! Scheduler tests: end-to-end over SQLite, failure paths over stub stores,
//! cancellation, concurrency, idempotence.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bugloc_core::config::RunSettings;
use bugloc_core::errors::{FusionError, StorageError};
use bugloc_core::events::types::*;
use bugloc_core::events::{EventDispatcher, FusionEventHandler};
use bugloc_core::traits::{Cancellable, CancellationToken, SignalStore};
use bugloc_core::types::*;
use bugloc_fusion::FusionScheduler;
use bugloc_storage::SqliteStore;

fn settings(alpha: f64, beta: f64, workers: usize) -> RunSettings {
    RunSettings {
        product: "swt".to_string(),
        weights: FusionWeights::new(alpha, beta).unwrap(),
        workers,
        order: BugOrder::Unordered,
    }
}

fn record(bug: i64, candidate: i64, code: f64, bug_sim: f64, stack: f64, commit: f64) -> SignalRecord {
    SignalRecord::new(
        BugId::from(bug),
        CandidateId::new(candidate),
        SignalScores {
            code_similarity: code,
            bug_similarity: bug_sim,
            stack_trace: stack,
            commit_log: commit,
        },
    )
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// In-memory signal store with injectable failures.
#[derive(Default)]
struct StubStore {
    rows: Mutex<FxHashMap<BugId, CandidateSignals>>,
    /// Candidates whose update matches no row.
    vanished: HashSet<CandidateId>,
    /// Bugs whose fetch fails.
    fail_fetch: HashSet<BugId>,
    /// Bugs whose writes fail.
    fail_write: HashSet<BugId>,
    fetches: AtomicUsize,
    /// Cancelled on the first fetch, when set.
    cancel_on_fetch: Option<CancellationToken>,
}

impl StubStore {
    fn with_records(records: Vec<SignalRecord>) -> Self {
        let store = Self::default();
        {
            let mut rows = store.rows.lock().unwrap();
            for r in records {
                rows.entry(r.bug_id.clone())
                    .or_default()
                    .insert(r.candidate_id, r);
            }
        }
        store
    }

    fn fused(&self, bug: i64, candidate: i64) -> f64 {
        self.rows.lock().unwrap()[&BugId::from(bug)][&CandidateId::new(candidate)].fused_final
    }
}

impl SignalStore for StubStore {
    fn analysis_values(&self, bug_id: &BugId) -> Result<CandidateSignals, StorageError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(token) = &self.cancel_on_fetch {
            token.cancel();
        }
        if self.fail_fetch.contains(bug_id) {
            return Err(StorageError::Unavailable {
                message: "connection reset".into(),
            });
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(bug_id)
            .cloned()
            .unwrap_or_default())
    }

    fn update_score(&self, record: &SignalRecord) -> Result<usize, StorageError> {
        if self.fail_write.contains(&record.bug_id) {
            return Err(StorageError::Unavailable {
                message: "disk I/O error".into(),
            });
        }
        if self.vanished.contains(&record.candidate_id) {
            return Ok(0);
        }
        let mut rows = self.rows.lock().unwrap();
        match rows
            .get_mut(&record.bug_id)
            .and_then(|c| c.get_mut(&record.candidate_id))
        {
            Some(stored) => {
                stored.normalized_code = record.normalized_code;
                stored.normalized_bug = record.normalized_bug;
                stored.fused_intermediate = record.fused_intermediate;
                stored.fused_final = record.fused_final;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[derive(Default)]
struct RecordingHandler {
    completed: Mutex<Vec<(BugId, usize)>>,
    misses: Mutex<Vec<CandidateId>>,
    failed: Mutex<Vec<(BugId, BugStage)>>,
    runs_complete: AtomicUsize,
}

impl FusionEventHandler for RecordingHandler {
    fn on_bug_completed(&self, event: &BugCompletedEvent) {
        self.completed
            .lock()
            .unwrap()
            .push((event.bug_id.clone(), event.completed));
    }

    fn on_persistence_miss(&self, event: &PersistenceMissEvent) {
        self.misses.lock().unwrap().push(event.candidate_id);
    }

    fn on_bug_failed(&self, event: &BugFailedEvent) {
        self.failed
            .lock()
            .unwrap()
            .push((event.bug_id.clone(), event.stage));
    }

    fn on_run_complete(&self, _event: &RunCompleteEvent) {
        self.runs_complete.fetch_add(1, Ordering::SeqCst);
    }
}

fn dispatcher_with(handler: Arc<RecordingHandler>) -> EventDispatcher {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(handler);
    dispatcher
}

// ── End to end over SQLite ──

#[test]
fn two_candidate_example_ranks_x_above_y() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.upsert_bug(&Bug::new(1, "swt")).unwrap();
    store
        .insert_signal_records(&[
            record(1, 100, 0.8, 0.2, 0.3, 0.5),
            record(1, 101, 0.2, 0.8, 0.0, 0.1),
        ])
        .unwrap();

    let report = FusionScheduler::new(&store, settings(0.5, 0.5, 1))
        .run_product(&store)
        .unwrap();

    assert_eq!(report.bugs_total, 1);
    assert_eq!(report.bugs_processed, 1);
    assert_eq!(report.candidates_fused, 2);
    assert_eq!(report.persistence_failures, 0);

    let ranked = store.ranked_candidates(&BugId::from(1), 10).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].candidate_id, CandidateId::new(100));
    assert_close(ranked[0].fused_final, 0.65);
    assert_eq!(ranked[1].candidate_id, CandidateId::new(101));
    assert_close(ranked[1].fused_final, 0.3);
}

#[test]
fn raw_signals_survive_a_run() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.upsert_bug(&Bug::new(1, "swt")).unwrap();
    store
        .insert_signal_records(&[
            record(1, 100, 4.0, 1.0, 0.3, 0.5),
            record(1, 101, 2.0, 3.0, 0.0, 0.1),
        ])
        .unwrap();

    FusionScheduler::new(&store, settings(0.2, 0.2, 1))
        .run_product(&store)
        .unwrap();

    let values = store.analysis_values(&BugId::from(1)).unwrap();
    let x = &values[&CandidateId::new(100)];
    assert_eq!(x.signals.code_similarity, 4.0);
    assert_eq!(x.signals.bug_similarity, 1.0);
    assert_eq!(x.normalized_code, 1.0);
    assert_eq!(x.normalized_bug, 0.0);
}

#[test]
fn single_candidate_bug_scores_zero() {
    let store = StubStore::with_records(vec![record(1, 100, 0.9, 0.4, 0.8, 0.7)]);
    let report = FusionScheduler::new(&store, settings(0.2, 0.2, 1))
        .run(&[BugId::from(1)])
        .unwrap();

    assert_eq!(report.bugs_processed, 1);
    assert_eq!(report.candidates_fused, 1);
    assert_eq!(store.fused(1, 100), 0.0);
}

#[test]
fn bug_without_candidates_is_processed_with_nothing_written() {
    let store = StubStore::default();
    let report = FusionScheduler::new(&store, settings(0.2, 0.2, 1))
        .run(&[BugId::from(404)])
        .unwrap();

    assert_eq!(report.bugs_processed, 1);
    let outcome = report.outcome(&BugId::from(404)).unwrap();
    assert_eq!(outcome.stage, BugStage::Persisted);
    assert_eq!(outcome.written, 0);
}

#[test]
fn empty_bug_list_yields_empty_report() {
    let store = StubStore::default();
    let handler = Arc::new(RecordingHandler::default());
    let report = FusionScheduler::new(&store, settings(0.2, 0.2, 2))
        .with_events(dispatcher_with(handler.clone()))
        .run(&[])
        .unwrap();

    assert_eq!(report.bugs_total, 0);
    assert!(report.outcomes.is_empty());
    assert_eq!(handler.runs_complete.load(Ordering::SeqCst), 1);
}

// ── Failure paths ──

#[test]
fn persistence_miss_is_counted_and_run_continues() {
    let mut store = StubStore::with_records(vec![
        record(1, 100, 0.8, 0.2, 0.3, 0.5),
        record(1, 101, 0.2, 0.8, 0.0, 0.1),
        record(1, 102, 0.5, 0.5, 0.0, 0.0),
        record(2, 200, 0.1, 0.9, 0.0, 0.0),
        record(2, 201, 0.9, 0.1, 0.0, 0.0),
    ]);
    store.vanished.insert(CandidateId::new(101));

    let handler = Arc::new(RecordingHandler::default());
    let report = FusionScheduler::new(&store, settings(0.5, 0.5, 1))
        .with_events(dispatcher_with(handler.clone()))
        .run(&[BugId::from(1), BugId::from(2)])
        .unwrap();

    assert_eq!(report.bugs_processed, 2);
    assert_eq!(report.bugs_failed, 0);
    assert_eq!(report.persistence_failures, 1);
    assert_eq!(report.candidates_fused, 4);

    let first = report.outcome(&BugId::from(1)).unwrap();
    assert_eq!(first.stage, BugStage::PartiallyFailed);
    assert_eq!(first.written, 2);
    assert_eq!(first.missed_candidates, vec![CandidateId::new(101)]);
    assert_eq!(
        report.outcome(&BugId::from(2)).unwrap().stage,
        BugStage::Persisted
    );

    assert_eq!(*handler.misses.lock().unwrap(), vec![CandidateId::new(101)]);
    // The remaining records of the bug were still written.
    assert!(store.fused(1, 100) > 0.0);
}

#[test]
fn fetch_failure_marks_bug_failed_and_moves_on() {
    let mut store = StubStore::with_records(vec![
        record(1, 100, 0.8, 0.2, 0.3, 0.5),
        record(1, 101, 0.2, 0.8, 0.0, 0.1),
        record(3, 300, 0.8, 0.2, 0.0, 0.0),
        record(3, 301, 0.2, 0.8, 0.0, 0.0),
    ]);
    store.fail_fetch.insert(BugId::from(2));

    let handler = Arc::new(RecordingHandler::default());
    let report = FusionScheduler::new(&store, settings(0.2, 0.2, 1))
        .with_events(dispatcher_with(handler.clone()))
        .run(&[BugId::from(1), BugId::from(2), BugId::from(3)])
        .unwrap();

    assert_eq!(report.bugs_processed, 2);
    assert_eq!(report.bugs_failed, 1);
    let failed = report.outcome(&BugId::from(2)).unwrap();
    assert!(failed.is_failed());
    assert_eq!(failed.stage, BugStage::Pending);
    assert!(failed.error.as_deref().unwrap().contains("connection reset"));

    assert_eq!(
        *handler.failed.lock().unwrap(),
        vec![(BugId::from(2), BugStage::Pending)]
    );
    assert!(store.fused(3, 300) > 0.0);
}

#[test]
fn write_failure_abandons_remaining_records_of_that_bug() {
    let mut store = StubStore::with_records(vec![
        record(1, 100, 0.8, 0.2, 0.3, 0.5),
        record(1, 101, 0.2, 0.8, 0.0, 0.1),
        record(2, 200, 0.8, 0.2, 0.0, 0.0),
        record(2, 201, 0.2, 0.8, 0.0, 0.0),
    ]);
    store.fail_write.insert(BugId::from(1));

    let report = FusionScheduler::new(&store, settings(0.2, 0.2, 1))
        .run(&[BugId::from(1), BugId::from(2)])
        .unwrap();

    let failed = report.outcome(&BugId::from(1)).unwrap();
    assert_eq!(failed.stage, BugStage::Combined);
    assert_eq!(failed.written, 0);
    assert!(failed.is_failed());
    assert_eq!(store.fused(1, 100), 0.0);

    assert_eq!(report.bugs_processed, 1);
    assert_eq!(report.candidates_fused, 2);
}

// ── Cancellation ──

#[test]
fn cancelled_before_start_is_an_error() {
    let store = StubStore::with_records(vec![record(1, 100, 0.8, 0.2, 0.3, 0.5)]);
    let token = CancellationToken::new();
    token.cancel();

    let result = FusionScheduler::new(&store, settings(0.2, 0.2, 1))
        .with_cancellation(token)
        .run(&[BugId::from(1)]);

    assert!(matches!(result, Err(FusionError::Cancelled)));
    assert_eq!(store.fetches.load(Ordering::SeqCst), 0);
}

#[test]
fn cancellation_mid_run_finishes_in_flight_bug_and_skips_the_rest() {
    let token = CancellationToken::new();
    let mut store = StubStore::with_records(
        (1..=5)
            .flat_map(|b| {
                vec![
                    record(b, b * 100, 0.8, 0.2, 0.0, 0.0),
                    record(b, b * 100 + 1, 0.2, 0.8, 0.0, 0.0),
                ]
            })
            .collect(),
    );
    store.cancel_on_fetch = Some(token.clone());

    let ids: Vec<BugId> = (1..=5).map(BugId::from).collect();
    let report = FusionScheduler::new(&store, settings(0.2, 0.2, 1))
        .with_cancellation(token)
        .run(&ids)
        .unwrap();

    assert_eq!(report.bugs_processed, 1);
    assert_eq!(report.bugs_skipped, 4);
    assert_eq!(report.bugs_failed, 0);
    assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(report.candidates_fused, 2);
    assert_eq!(
        report.outcomes.iter().filter(|o| o.is_skipped()).count(),
        4
    );
}

// ── Ordering and progress ──

#[test]
fn single_worker_follows_fixed_date_order() {
    let store = SqliteStore::open_in_memory().unwrap();
    for (bug, date) in [(1, "2005-01-01"), (2, "2003-01-01"), (3, "2004-01-01")] {
        store.upsert_bug(&Bug::new(bug, "swt").with_fixed_date(date)).unwrap();
        store
            .insert_signal_records(&[
                record(bug, bug * 10, 0.1, 0.2, 0.0, 0.0),
                record(bug, bug * 10 + 1, 0.3, 0.4, 0.0, 0.0),
            ])
            .unwrap();
    }

    let handler = Arc::new(RecordingHandler::default());
    let mut run = settings(0.2, 0.2, 1);
    run.order = BugOrder::ByFixedDate;
    FusionScheduler::new(&store, run)
        .with_events(dispatcher_with(handler.clone()))
        .run_product(&store)
        .unwrap();

    let completed = handler.completed.lock().unwrap().clone();
    let order: Vec<BugId> = completed.iter().map(|(id, _)| id.clone()).collect();
    assert_eq!(order, vec![BugId::from(2), BugId::from(3), BugId::from(1)]);
    let counters: Vec<usize> = completed.iter().map(|(_, c)| *c).collect();
    assert_eq!(counters, vec![1, 2, 3]);
}

// ── Concurrency and idempotence ──

fn seed_product(store: &SqliteStore, bugs: i64, candidates: i64) {
    for bug in 0..bugs {
        store.upsert_bug(&Bug::new(bug, "swt")).unwrap();
        let records: Vec<SignalRecord> = (0..candidates)
            .map(|c| {
                let x = ((bug * 31 + c * 17) % 23) as f64;
                record(bug, bug * 1000 + c, x, 23.0 - x, (c % 3) as f64 * 0.1, 0.05 * c as f64)
            })
            .collect();
        store.insert_signal_records(&records).unwrap();
    }
}

fn snapshot(store: &SqliteStore, bugs: i64) -> Vec<(CandidateId, f64, f64)> {
    let mut out = Vec::new();
    for bug in 0..bugs {
        let mut values: Vec<SignalRecord> = store
            .analysis_values(&BugId::from(bug))
            .unwrap()
            .into_values()
            .collect();
        values.sort_by_key(|r| r.candidate_id);
        out.extend(
            values
                .into_iter()
                .map(|r| (r.candidate_id, r.fused_intermediate, r.fused_final)),
        );
    }
    out
}

#[test]
fn parallel_run_matches_sequential_run() {
    let seq_dir = tempfile::tempdir().unwrap();
    let par_dir = tempfile::tempdir().unwrap();
    let sequential = SqliteStore::open(&seq_dir.path().join("bugloc.db"), 2).unwrap();
    let parallel = SqliteStore::open(&par_dir.path().join("bugloc.db"), 4).unwrap();
    seed_product(&sequential, 40, 12);
    seed_product(&parallel, 40, 12);

    let seq_report = FusionScheduler::new(&sequential, settings(0.3, 0.4, 1))
        .run_product(&sequential)
        .unwrap();
    let par_report = FusionScheduler::new(&parallel, settings(0.3, 0.4, 4))
        .run_product(&parallel)
        .unwrap();

    assert_eq!(seq_report.bugs_processed, 40);
    assert_eq!(par_report.bugs_processed, 40);
    assert_eq!(par_report.candidates_fused, 480);
    assert_eq!(snapshot(&sequential, 40), snapshot(&parallel, 40));
}

#[test]
fn second_run_over_same_raw_data_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&dir.path().join("bugloc.db"), 2).unwrap();
    seed_product(&store, 10, 8);

    let scheduler = FusionScheduler::new(&store, settings(0.2, 0.2, 3));
    scheduler.run_product(&store).unwrap();
    let first = snapshot(&store, 10);
    scheduler.run_product(&store).unwrap();
    let second = snapshot(&store, 10);

    assert_eq!(first, second);
}

#[test]
fn report_serializes_to_json() {
    let store = StubStore::with_records(vec![
        record(1, 100, 0.8, 0.2, 0.3, 0.5),
        record(1, 101, 0.2, 0.8, 0.0, 0.1),
    ]);
    let report = FusionScheduler::new(&store, settings(0.5, 0.5, 1))
        .run(&[BugId::from(1)])
        .unwrap();

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["bugs_processed"], 1);
    assert_eq!(json["candidates_fused"], 2);
    assert_eq!(json["outcomes"][0]["bug_id"], "1");
    assert_eq!(json["outcomes"][0]["stage"], "persisted");
    assert!(json["outcomes"][0].get("error").is_none());
    assert!(report.summary_line().starts_with("swt: 1/1 bugs fused"));
}
