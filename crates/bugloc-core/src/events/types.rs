//! Event payload types.

use crate::types::{BugId, BugStage, CandidateId};

/// Payload for `on_run_started`.
#[derive(Debug, Clone)]
pub struct RunStartedEvent {
    pub product: String,
    pub bug_count: usize,
    pub workers: usize,
}

/// Payload for `on_bug_completed`. `completed` is the run's completion
/// counter after this bug; it is only meaningful as progress.
#[derive(Debug, Clone)]
pub struct BugCompletedEvent {
    pub bug_id: BugId,
    pub stage: BugStage,
    pub completed: usize,
    pub total: usize,
    pub written: usize,
    pub missed: usize,
    pub elapsed_ms: u64,
}

/// Payload for `on_persistence_miss`.
#[derive(Debug, Clone)]
pub struct PersistenceMissEvent {
    pub bug_id: BugId,
    pub candidate_id: CandidateId,
}

/// Payload for `on_bug_failed`.
#[derive(Debug, Clone)]
pub struct BugFailedEvent {
    pub bug_id: BugId,
    /// Last stage the bug reached before the store failed.
    pub stage: BugStage,
    pub message: String,
}

/// Payload for `on_run_complete`.
#[derive(Debug, Clone)]
pub struct RunCompleteEvent {
    pub bugs_processed: usize,
    pub bugs_failed: usize,
    pub bugs_skipped: usize,
    pub candidates_fused: usize,
    pub persistence_failures: usize,
    pub duration_ms: u64,
}
