//! Core data model: bugs, candidates, and their signal records.

pub mod bug;
pub mod collections;
pub mod identifiers;
pub mod signal;
pub mod stage;
pub mod weights;

pub use bug::{Bug, BugOrder};
pub use collections::{CandidateSignals, FxHashMap};
pub use identifiers::{BugId, CandidateId};
pub use signal::{SignalRecord, SignalScores};
pub use stage::BugStage;
pub use weights::FusionWeights;
