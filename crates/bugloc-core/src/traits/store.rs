//! Bug source and signal store interfaces.

use crate::errors::StorageError;
use crate::types::{Bug, BugId, BugOrder, CandidateSignals, SignalRecord};

/// Lists the bugs of a product.
pub trait BugSource: Send + Sync {
    fn all_bugs(&self, product: &str, order: BugOrder) -> Result<Vec<Bug>, StorageError>;
}

/// Per-bug signal records: read in full, written back one record at a time.
///
/// Implementations must allow concurrent calls for different bugs without a
/// run-wide lock.
pub trait SignalStore: Send + Sync {
    /// Every candidate currently known for `bug_id`, with raw signals
    /// zero-filled where a signal was not computed. An unknown bug yields an
    /// empty map.
    fn analysis_values(&self, bug_id: &BugId) -> Result<CandidateSignals, StorageError>;

    /// Persist the normalized and fused values of `record`.
    ///
    /// Returns the number of rows affected. `0` means the record could not be
    /// located; implementations must not insert it.
    fn update_score(&self, record: &SignalRecord) -> Result<usize, StorageError>;
}
