//! Bug processing scheduler: a bounded rayon pool over bug ids.
//!
//! Workers run the per-bug pipeline and send outcomes over a bounded
//! crossbeam channel. The calling thread drains the channel, folds outcomes
//! into the run report and fires events, so handlers never run concurrently.

mod worker;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use bugloc_core::config::RunSettings;
use bugloc_core::constants::OUTCOME_CHANNEL_CAPACITY;
use bugloc_core::errors::FusionError;
use bugloc_core::events::types::{
    BugCompletedEvent, BugFailedEvent, PersistenceMissEvent, RunCompleteEvent, RunStartedEvent,
};
use bugloc_core::events::EventDispatcher;
use bugloc_core::tracing::metrics::FUSION_RUN_SPAN;
use bugloc_core::traits::{BugSource, Cancellable, CancellationToken, SignalStore};
use bugloc_core::types::BugId;
use rayon::prelude::*;

use crate::report::{BugOutcome, RunReport};

/// A worker's message to the aggregating thread.
struct Finished {
    outcome: BugOutcome,
    /// Completion counter after this bug; 0 for skipped bugs.
    completed: usize,
}

/// Drives one fusion run over a set of bugs.
pub struct FusionScheduler<'a> {
    store: &'a dyn SignalStore,
    settings: RunSettings,
    events: EventDispatcher,
    cancel: CancellationToken,
}

impl<'a> FusionScheduler<'a> {
    pub fn new(store: &'a dyn SignalStore, settings: RunSettings) -> Self {
        Self {
            store,
            settings,
            events: EventDispatcher::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    /// Share a cancellation token with the caller.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Fuse every bug of the configured product, in the configured order.
    ///
    /// Failing to list the bugs is fatal: there is nothing to run.
    pub fn run_product(&self, source: &dyn BugSource) -> Result<RunReport, FusionError> {
        let bugs = source.all_bugs(&self.settings.product, self.settings.order)?;
        let ids: Vec<BugId> = bugs.into_iter().map(|b| b.id).collect();
        self.run(&ids)
    }

    /// Fuse the given bugs.
    ///
    /// Per-record misses and per-bug store failures are counted in the
    /// report. Returns `Cancelled` only if the token was set before any bug
    /// started; a later cancellation yields a report with skipped bugs.
    pub fn run(&self, bug_ids: &[BugId]) -> Result<RunReport, FusionError> {
        if self.cancel.is_cancelled() {
            return Err(FusionError::Cancelled);
        }

        let started = Instant::now();
        let total = bug_ids.len();
        let workers = self.settings.workers.max(1);

        let run_span = tracing::info_span!(
            FUSION_RUN_SPAN,
            product = %self.settings.product,
            bugs = total,
            workers
        );
        let _guard = run_span.enter();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("bugloc-fusion-{i}"))
            .build()
            .map_err(|e| FusionError::WorkerPool(e.to_string()))?;

        tracing::info!(
            product = %self.settings.product,
            bugs = total,
            workers,
            alpha = self.settings.weights.alpha(),
            beta = self.settings.weights.beta(),
            "fusion run started"
        );
        self.events.emit_run_started(&RunStartedEvent {
            product: self.settings.product.clone(),
            bug_count: total,
            workers,
        });

        let completed = AtomicUsize::new(0);
        let (tx, rx) = crossbeam_channel::bounded::<Finished>(OUTCOME_CHANNEL_CAPACITY);
        let mut report = RunReport::new(self.settings.product.clone(), total);

        std::thread::scope(|scope| {
            let completed = &completed;
            let run_span = &run_span;
            scope.spawn(move || {
                pool.install(|| {
                    bug_ids.par_iter().for_each_with(tx, |tx, bug_id| {
                        let message = if self.cancel.is_cancelled() {
                            Finished {
                                outcome: BugOutcome::skipped(bug_id.clone()),
                                completed: 0,
                            }
                        } else {
                            let outcome = worker::fuse_bug(
                                self.store,
                                bug_id,
                                self.settings.weights,
                                run_span,
                            );
                            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            tracing::debug!(completed = done, total, "bug finished");
                            Finished {
                                outcome,
                                completed: done,
                            }
                        };
                        // The receiver lives until every sender is gone.
                        let _ = tx.send(message);
                    });
                });
            });

            for finished in rx.iter() {
                self.dispatch(&finished, total);
                report.record(finished.outcome);
            }
        });

        report.outcomes.sort_by(|a, b| a.bug_id.cmp(&b.bug_id));
        report.elapsed_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            processed = report.bugs_processed,
            failed = report.bugs_failed,
            skipped = report.bugs_skipped,
            candidates = report.candidates_fused,
            persistence_failures = report.persistence_failures,
            elapsed_ms = report.elapsed_ms,
            "fusion run complete"
        );
        self.events.emit_run_complete(&RunCompleteEvent {
            bugs_processed: report.bugs_processed,
            bugs_failed: report.bugs_failed,
            bugs_skipped: report.bugs_skipped,
            candidates_fused: report.candidates_fused,
            persistence_failures: report.persistence_failures,
            duration_ms: report.elapsed_ms,
        });

        Ok(report)
    }

    fn dispatch(&self, finished: &Finished, total: usize) {
        let outcome = &finished.outcome;
        if outcome.is_skipped() {
            return;
        }

        for candidate_id in &outcome.missed_candidates {
            self.events.emit_persistence_miss(&PersistenceMissEvent {
                bug_id: outcome.bug_id.clone(),
                candidate_id: *candidate_id,
            });
        }

        match &outcome.error {
            Some(message) => self.events.emit_bug_failed(&BugFailedEvent {
                bug_id: outcome.bug_id.clone(),
                stage: outcome.stage,
                message: message.clone(),
            }),
            None => self.events.emit_bug_completed(&BugCompletedEvent {
                bug_id: outcome.bug_id.clone(),
                stage: outcome.stage,
                completed: finished.completed,
                total,
                written: outcome.written,
                missed: outcome.missed,
                elapsed_ms: outcome.elapsed_ms,
            }),
        }
    }
}
