//! The per-bug pipeline: fetch, normalize, combine, persist.

use std::time::Instant;

use bugloc_core::tracing::metrics::FUSE_BUG_SPAN;
use bugloc_core::traits::SignalStore;
use bugloc_core::types::{BugId, BugStage, FusionWeights, SignalRecord};
use tracing::Span;

use crate::report::BugOutcome;
use crate::{combiner, normalizer};

/// Run one bug's pass. Never panics on store failure: a store error ends the
/// bug with `error` set and the last stage reached.
pub(crate) fn fuse_bug(
    store: &dyn SignalStore,
    bug_id: &BugId,
    weights: FusionWeights,
    run_span: &Span,
) -> BugOutcome {
    let span = tracing::info_span!(parent: run_span, FUSE_BUG_SPAN, bug_id = %bug_id);
    let _guard = span.enter();
    let started = Instant::now();

    let mut outcome = BugOutcome {
        bug_id: bug_id.clone(),
        stage: BugStage::Pending,
        written: 0,
        missed: 0,
        missed_candidates: Vec::new(),
        elapsed_ms: 0,
        error: None,
    };

    let mut records = match store.analysis_values(bug_id) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(bug_id = %bug_id, stage = %outcome.stage, error = %e, "failed to fetch signal records");
            outcome.error = Some(e.to_string());
            outcome.elapsed_ms = started.elapsed().as_millis() as u64;
            return outcome;
        }
    };
    outcome.stage = BugStage::Fetched;

    let bounds = normalizer::normalize(&mut records);
    if bounds.any_degenerate() && !records.is_empty() {
        tracing::debug!(
            bug_id = %bug_id,
            candidates = records.len(),
            code_degenerate = bounds.code_degenerate,
            bug_degenerate = bounds.bug_degenerate,
            "degenerate similarity range, normalized to 0"
        );
    }
    outcome.stage = BugStage::Normalized;

    let scored = combiner::combine_all(&mut records, weights);
    outcome.stage = BugStage::Combined;

    let mut ordered: Vec<&SignalRecord> = records.values().collect();
    ordered.sort_unstable_by_key(|r| r.candidate_id);

    for record in ordered {
        match store.update_score(record) {
            Ok(0) => {
                tracing::warn!(
                    bug_id = %bug_id,
                    candidate_id = %record.candidate_id,
                    "score update matched no row"
                );
                outcome.missed += 1;
                outcome.missed_candidates.push(record.candidate_id);
            }
            Ok(_) => outcome.written += 1,
            Err(e) => {
                tracing::error!(
                    bug_id = %bug_id,
                    candidate_id = %record.candidate_id,
                    written = outcome.written,
                    error = %e,
                    "store unavailable, abandoning bug"
                );
                outcome.error = Some(e.to_string());
                outcome.elapsed_ms = started.elapsed().as_millis() as u64;
                return outcome;
            }
        }
    }

    outcome.stage = if outcome.missed == 0 {
        BugStage::Persisted
    } else {
        BugStage::PartiallyFailed
    };
    outcome.elapsed_ms = started.elapsed().as_millis() as u64;

    tracing::info!(
        bug_id = %bug_id,
        candidates = records.len(),
        scored,
        written = outcome.written,
        missed = outcome.missed,
        elapsed_ms = outcome.elapsed_ms,
        "bug fused"
    );
    outcome
}
