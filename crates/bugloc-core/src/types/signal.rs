//! Per (bug, candidate) signal records.

use serde::{Deserialize, Serialize};

use super::{BugId, CandidateId};

/// The four raw relevance signals computed upstream for one candidate.
///
/// A signal that was never computed for a candidate is `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalScores {
    /// Text relevance of the candidate to the bug report. Unbounded, >= 0.
    pub code_similarity: f64,
    /// Relevance through similar, previously fixed bugs. Unbounded, >= 0.
    pub bug_similarity: f64,
    /// Stack-trace frame match. >= 0, zero without a trace.
    pub stack_trace: f64,
    /// Recency/frequency of commits touching the candidate. >= 0.
    pub commit_log: f64,
}

/// One bug × candidate record: raw signals plus the values derived from
/// them during a fusion pass.
///
/// Raw signals are never overwritten. The normalized and fused fields are
/// recomputed from scratch on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub bug_id: BugId,
    pub candidate_id: CandidateId,
    pub signals: SignalScores,
    pub normalized_code: f64,
    pub normalized_bug: f64,
    /// Text+history blend, before the gate.
    pub fused_intermediate: f64,
    /// Final ranking score.
    pub fused_final: f64,
}

impl SignalRecord {
    pub fn new(bug_id: BugId, candidate_id: CandidateId, signals: SignalScores) -> Self {
        Self {
            bug_id,
            candidate_id,
            signals,
            normalized_code: 0.0,
            normalized_bug: 0.0,
            fused_intermediate: 0.0,
            fused_final: 0.0,
        }
    }
}
