//! Query modules for each domain table.

pub mod bugs;
pub mod signals;

use bugloc_core::errors::StorageError;

pub(crate) fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}
