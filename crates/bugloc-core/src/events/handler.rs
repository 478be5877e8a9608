//! FusionEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Observer for fusion runs.
///
/// Handlers override only the events they care about. Callbacks arrive from
/// the aggregating thread, never concurrently for one run.
pub trait FusionEventHandler: Send + Sync {
    fn on_run_started(&self, _event: &RunStartedEvent) {}
    fn on_bug_completed(&self, _event: &BugCompletedEvent) {}
    fn on_persistence_miss(&self, _event: &PersistenceMissEvent) {}
    fn on_bug_failed(&self, _event: &BugFailedEvent) {}
    fn on_run_complete(&self, _event: &RunCompleteEvent) {}
}
