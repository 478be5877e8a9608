//! Run-scoped results of a fusion pass.

use bugloc_core::types::{BugId, BugStage, CandidateId};
use serde::Serialize;

/// How one bug's pass ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BugOutcome {
    pub bug_id: BugId,
    /// Terminal stage, or the last stage reached before a store failure.
    /// `Pending` for a bug never started.
    pub stage: BugStage,
    /// Records whose update affected a row.
    pub written: usize,
    /// Records whose update affected zero rows.
    pub missed: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missed_candidates: Vec<CandidateId>,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BugOutcome {
    /// Outcome for a bug skipped because the run was cancelled first.
    pub fn skipped(bug_id: BugId) -> Self {
        Self {
            bug_id,
            stage: BugStage::Pending,
            written: 0,
            missed: 0,
            missed_candidates: Vec::new(),
            elapsed_ms: 0,
            error: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_skipped(&self) -> bool {
        self.stage == BugStage::Pending && self.error.is_none()
    }
}

/// Aggregate of a fusion run. A non-zero failure count does not make the run
/// itself fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub product: String,
    pub bugs_total: usize,
    pub bugs_processed: usize,
    pub bugs_failed: usize,
    pub bugs_skipped: usize,
    pub candidates_fused: usize,
    pub persistence_failures: usize,
    pub elapsed_ms: u64,
    /// Per-bug outcomes, sorted by bug id.
    pub outcomes: Vec<BugOutcome>,
}

impl RunReport {
    pub fn new(product: impl Into<String>, bugs_total: usize) -> Self {
        Self {
            product: product.into(),
            bugs_total,
            outcomes: Vec::with_capacity(bugs_total),
            ..Default::default()
        }
    }

    /// Fold one bug outcome into the totals.
    pub fn record(&mut self, outcome: BugOutcome) {
        if outcome.is_skipped() {
            self.bugs_skipped += 1;
        } else if outcome.is_failed() {
            self.bugs_failed += 1;
        } else {
            self.bugs_processed += 1;
        }
        self.candidates_fused += outcome.written;
        self.persistence_failures += outcome.missed;
        self.outcomes.push(outcome);
    }

    pub fn outcome(&self, bug_id: &BugId) -> Option<&BugOutcome> {
        self.outcomes.iter().find(|o| &o.bug_id == bug_id)
    }

    /// One-line human summary.
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {}/{} bugs fused, {} failed, {} skipped; {} candidates scored, {} persistence misses in {}ms",
            self.product,
            self.bugs_processed,
            self.bugs_total,
            self.bugs_failed,
            self.bugs_skipped,
            self.candidates_fused,
            self.persistence_failures,
            self.elapsed_ms,
        )
    }
}
