//! Write connection utilities.

use bugloc_core::errors::StorageError;
use rusqlite::{Connection, ErrorCode, Transaction, TransactionBehavior};

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// The write lock is taken at transaction start; a failing closure rolls back.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(map_busy)?;

    let result = f(&tx)?;

    tx.commit().map_err(map_busy)?;
    Ok(result)
}

/// Map a rusqlite error, distinguishing lock contention.
pub fn map_busy(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => StorageError::DbBusy,
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}
