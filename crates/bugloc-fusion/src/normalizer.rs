//! Per-bug min-max normalization of the two similarity signals.

use bugloc_core::constants::DEGENERATE_NORMALIZED_VALUE;
use bugloc_core::types::{CandidateSignals, SignalRecord};
use serde::Serialize;

/// Observed range of one signal over a bug's finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalRange {
    pub min: f64,
    pub max: f64,
}

impl SignalRange {
    /// Scan finite values; `None` when there are none.
    pub fn scan(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(r) => Some(Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    /// Map `value` into `[0, 1]` relative to this range.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() {
            return DEGENERATE_NORMALIZED_VALUE;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// What a normalization pass saw, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NormalizationBounds {
    pub code: Option<SignalRange>,
    pub bug: Option<SignalRange>,
    pub code_degenerate: bool,
    pub bug_degenerate: bool,
}

impl NormalizationBounds {
    pub fn any_degenerate(&self) -> bool {
        self.code_degenerate || self.bug_degenerate
    }
}

/// Normalize `code_similarity` and `bug_similarity` over all records of one
/// bug into `normalized_code` / `normalized_bug`.
///
/// A collapsed range (all values equal, a single candidate, or no finite
/// value) yields `0.0` for every record of that signal. The two signals are
/// handled independently. Nothing but the normalized fields is written.
pub fn normalize(records: &mut CandidateSignals) -> NormalizationBounds {
    if records.is_empty() {
        return NormalizationBounds::default();
    }

    let code = SignalRange::scan(records.values().map(|r| r.signals.code_similarity));
    let bug = SignalRange::scan(records.values().map(|r| r.signals.bug_similarity));

    for record in records.values_mut() {
        apply(record, code, bug);
    }

    NormalizationBounds {
        code,
        bug,
        code_degenerate: code.map_or(true, |r| r.is_degenerate()),
        bug_degenerate: bug.map_or(true, |r| r.is_degenerate()),
    }
}

fn apply(record: &mut SignalRecord, code: Option<SignalRange>, bug: Option<SignalRange>) {
    record.normalized_code = code.map_or(DEGENERATE_NORMALIZED_VALUE, |r| {
        r.normalize(record.signals.code_similarity)
    });
    record.normalized_bug = bug.map_or(DEGENERATE_NORMALIZED_VALUE, |r| {
        r.normalize(record.signals.bug_similarity)
    });
}
