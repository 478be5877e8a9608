//! Queries for the bugs table.

use bugloc_core::errors::StorageError;
use bugloc_core::types::{Bug, BugId, BugOrder};
use rusqlite::{params, Connection};

use super::sqlite_err;

/// Insert or replace a bug report.
pub fn upsert_bug(conn: &Connection, bug: &Bug) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO bugs (bug_id, product, fixed_date) VALUES (?1, ?2, ?3)
         ON CONFLICT(bug_id) DO UPDATE SET
            product = excluded.product,
            fixed_date = excluded.fixed_date",
        params![bug.id.as_str(), bug.product, bug.fixed_date],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

/// All bugs of a product.
///
/// `ByFixedDate` returns the oldest fix first, undated bugs last, ties by id.
/// `Unordered` makes no ordering promise.
pub fn all_bugs(
    conn: &Connection,
    product: &str,
    order: BugOrder,
) -> Result<Vec<Bug>, StorageError> {
    let sql = match order {
        BugOrder::Unordered => "SELECT bug_id, product, fixed_date FROM bugs WHERE product = ?1",
        BugOrder::ByFixedDate => {
            "SELECT bug_id, product, fixed_date FROM bugs WHERE product = ?1
             ORDER BY fixed_date IS NULL, fixed_date ASC, bug_id ASC"
        }
    };

    let mut stmt = conn.prepare_cached(sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![product], |row| {
            Ok(Bug {
                id: BugId(row.get(0)?),
                product: row.get(1)?,
                fixed_date: row.get(2)?,
            })
        })
        .map_err(sqlite_err)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Number of bugs recorded for a product.
pub fn count_bugs(conn: &Connection, product: &str) -> Result<usize, StorageError> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM bugs WHERE product = ?1",
            params![product],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;
    Ok(count as usize)
}
