//! Storage errors.

use super::error_code::{self, BuglocErrorCode};

/// Errors raised by a signal store.
///
/// From the fusion engine's point of view every variant means the store is
/// unavailable for the bug being processed.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Database busy")]
    DbBusy,

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

impl BuglocErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::DbBusy => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::Unavailable { .. } => error_code::STORE_UNAVAILABLE,
        }
    }
}
