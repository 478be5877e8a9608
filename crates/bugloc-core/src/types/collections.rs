//! Collection aliases used across the workspace.

pub use rustc_hash::FxHashMap;

use super::{CandidateId, SignalRecord};

/// All signal records of one bug, keyed by candidate. Iteration order
/// carries no meaning.
pub type CandidateSignals = FxHashMap<CandidateId, SignalRecord>;
