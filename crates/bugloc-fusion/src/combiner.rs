//! Weighted combination of normalized similarity, stack-trace and commit-log
//! signals into the final ranking score.

use bugloc_core::types::{CandidateSignals, FusionWeights, SignalRecord};

/// Intermediate and final score for one candidate.
///
/// ```text
/// text  = (1 - α) · normalized_code + α · normalized_bug
/// final = (1 - β) · (text + stack) + β · commit     if text > 0
///       = 0                                         otherwise
/// ```
///
/// A candidate with no textual relevance gets no score at all, whatever its
/// stack-trace or commit-log signals.
pub fn fused_scores(
    normalized_code: f64,
    normalized_bug: f64,
    stack_trace: f64,
    commit_log: f64,
    weights: FusionWeights,
) -> (f64, f64) {
    let alpha = weights.alpha();
    let beta = weights.beta();

    let text = (1.0 - alpha) * normalized_code + alpha * normalized_bug;
    let fused = if text > 0.0 {
        (1.0 - beta) * (text + stack_trace) + beta * commit_log
    } else {
        0.0
    };
    (text, fused)
}

/// Combine one record in place. Writes `fused_intermediate` and
/// `fused_final` only.
pub fn combine(record: &mut SignalRecord, weights: FusionWeights) {
    let (text, fused) = fused_scores(
        record.normalized_code,
        record.normalized_bug,
        record.signals.stack_trace,
        record.signals.commit_log,
        weights,
    );
    record.fused_intermediate = text;
    record.fused_final = fused;
}

/// Combine every record of a bug. Returns how many records passed the gate.
pub fn combine_all(records: &mut CandidateSignals, weights: FusionWeights) -> usize {
    let mut scored = 0;
    for record in records.values_mut() {
        combine(record, weights);
        if record.fused_intermediate > 0.0 {
            scored += 1;
        }
    }
    scored
}
