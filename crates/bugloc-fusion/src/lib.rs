//! # bugloc-fusion
//!
//! Turns four raw relevance signals per (bug, candidate) pair into one
//! ranking score. Per bug: fetch every candidate, min-max normalize the two
//! similarity signals over that bug's set, combine with the stack-trace and
//! commit-log signals, write the derived values back.

pub mod combiner;
pub mod normalizer;
pub mod report;
pub mod scheduler;

pub use combiner::{combine, combine_all};
pub use normalizer::{normalize, NormalizationBounds, SignalRange};
pub use report::{BugOutcome, RunReport};
pub use scheduler::FusionScheduler;
