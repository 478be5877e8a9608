//! SqliteStore: the SQLite-backed bug source and signal store.

use std::path::Path;

use bugloc_core::config::StorageConfig;
use bugloc_core::errors::StorageError;
use bugloc_core::traits::{BugSource, SignalStore};
use bugloc_core::types::{Bug, BugId, BugOrder, CandidateSignals, SignalRecord};

use crate::connection::DatabaseManager;
use crate::queries::signals::RankedCandidate;
use crate::queries::{bugs, signals};

/// Reads go through the read pool; score updates go through the writer,
/// one record per lock acquisition.
pub struct SqliteStore {
    db: DatabaseManager,
}

impl SqliteStore {
    pub fn open(path: &Path, read_pool_size: usize) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path, read_pool_size)?,
        })
    }

    /// Open the store described by a storage config section.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::open(
            Path::new(config.effective_db_path()),
            config.effective_read_pool_size(),
        )
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    pub fn upsert_bug(&self, bug: &Bug) -> Result<(), StorageError> {
        self.db.with_writer(|conn| bugs::upsert_bug(conn, bug))
    }

    pub fn insert_signal_records(&self, records: &[SignalRecord]) -> Result<usize, StorageError> {
        self.db
            .with_writer(|conn| signals::insert_signal_records(conn, records))
    }

    pub fn ranked_candidates(
        &self,
        bug_id: &BugId,
        limit: usize,
    ) -> Result<Vec<RankedCandidate>, StorageError> {
        self.db
            .with_reader(|conn| signals::ranked_candidates(conn, bug_id, limit))
    }
}

impl BugSource for SqliteStore {
    fn all_bugs(&self, product: &str, order: BugOrder) -> Result<Vec<Bug>, StorageError> {
        self.db.with_reader(|conn| bugs::all_bugs(conn, product, order))
    }
}

impl SignalStore for SqliteStore {
    fn analysis_values(&self, bug_id: &BugId) -> Result<CandidateSignals, StorageError> {
        self.db
            .with_reader(|conn| signals::analysis_values(conn, bug_id))
    }

    fn update_score(&self, record: &SignalRecord) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| signals::update_score(conn, record))
    }
}
