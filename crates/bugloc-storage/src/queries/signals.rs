//! Queries for the signal_records table.

use bugloc_core::errors::StorageError;
use bugloc_core::types::{
    BugId, CandidateId, CandidateSignals, SignalRecord, SignalScores,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

use super::sqlite_err;
use crate::connection::writer::with_immediate_transaction;

const SELECT_RECORD: &str = "SELECT bug_id, candidate_id,
        code_similarity, bug_similarity, stack_trace, commit_log,
        COALESCE(normalized_code, 0), COALESCE(normalized_bug, 0),
        COALESCE(fused_intermediate, 0), COALESCE(fused_final, 0)
     FROM signal_records";

/// A candidate's place in a bug's ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// 1-based position.
    pub rank: usize,
    pub candidate_id: CandidateId,
    pub fused_final: f64,
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<SignalRecord> {
    Ok(SignalRecord {
        bug_id: BugId(row.get(0)?),
        candidate_id: CandidateId(row.get(1)?),
        signals: SignalScores {
            code_similarity: row.get(2)?,
            bug_similarity: row.get(3)?,
            stack_trace: row.get(4)?,
            commit_log: row.get(5)?,
        },
        normalized_code: row.get(6)?,
        normalized_bug: row.get(7)?,
        fused_intermediate: row.get(8)?,
        fused_final: row.get(9)?,
    })
}

/// Insert raw signals for many records in one immediate transaction.
///
/// An existing (bug, candidate) row has its raw columns replaced; derived
/// columns are left alone. Returns the number of records written.
pub fn insert_signal_records(
    conn: &Connection,
    records: &[SignalRecord],
) -> Result<usize, StorageError> {
    with_immediate_transaction(conn, |tx| {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO signal_records
                    (bug_id, candidate_id, code_similarity, bug_similarity, stack_trace, commit_log)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(bug_id, candidate_id) DO UPDATE SET
                    code_similarity = excluded.code_similarity,
                    bug_similarity = excluded.bug_similarity,
                    stack_trace = excluded.stack_trace,
                    commit_log = excluded.commit_log",
            )
            .map_err(sqlite_err)?;

        let mut written = 0;
        for record in records {
            let s = &record.signals;
            written += stmt
                .execute(params![
                    record.bug_id.as_str(),
                    record.candidate_id.inner(),
                    s.code_similarity,
                    s.bug_similarity,
                    s.stack_trace,
                    s.commit_log,
                ])
                .map_err(sqlite_err)?;
        }
        Ok(written)
    })
}

/// Every candidate recorded for a bug, keyed by candidate id.
pub fn analysis_values(conn: &Connection, bug_id: &BugId) -> Result<CandidateSignals, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT_RECORD} WHERE bug_id = ?1"))
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![bug_id.as_str()], map_record)
        .map_err(sqlite_err)?;

    let mut out = CandidateSignals::default();
    for row in rows {
        let record = row.map_err(sqlite_err)?;
        out.insert(record.candidate_id, record);
    }
    Ok(out)
}

/// A single record, if present.
pub fn get_signal_record(
    conn: &Connection,
    bug_id: &BugId,
    candidate_id: CandidateId,
) -> Result<Option<SignalRecord>, StorageError> {
    conn.query_row(
        &format!("{SELECT_RECORD} WHERE bug_id = ?1 AND candidate_id = ?2"),
        params![bug_id.as_str(), candidate_id.inner()],
        map_record,
    )
    .optional()
    .map_err(sqlite_err)
}

/// Write the derived values of one record. Raw columns are not touched.
/// Returns rows affected: 0 when the (bug, candidate) row does not exist.
pub fn update_score(conn: &Connection, record: &SignalRecord) -> Result<usize, StorageError> {
    conn.prepare_cached(
        "UPDATE signal_records SET
            normalized_code = ?1, normalized_bug = ?2,
            fused_intermediate = ?3, fused_final = ?4
         WHERE bug_id = ?5 AND candidate_id = ?6",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            record.normalized_code,
            record.normalized_bug,
            record.fused_intermediate,
            record.fused_final,
            record.bug_id.as_str(),
            record.candidate_id.inner(),
        ])
    })
    .map_err(sqlite_err)
}

/// Top `limit` candidates of a bug by final score, ties by candidate id.
/// Rows never written by a fusion pass are excluded.
pub fn ranked_candidates(
    conn: &Connection,
    bug_id: &BugId,
    limit: usize,
) -> Result<Vec<RankedCandidate>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT candidate_id, fused_final FROM signal_records
             WHERE bug_id = ?1 AND fused_final IS NOT NULL
             ORDER BY fused_final DESC, candidate_id ASC
             LIMIT ?2",
        )
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![bug_id.as_str(), limit as i64], |row| {
            Ok((CandidateId(row.get(0)?), row.get::<_, f64>(1)?))
        })
        .map_err(sqlite_err)?;

    let mut out = Vec::new();
    for (i, row) in rows.enumerate() {
        let (candidate_id, fused_final) = row.map_err(sqlite_err)?;
        out.push(RankedCandidate {
            rank: i + 1,
            candidate_id,
            fused_final,
        });
    }
    Ok(out)
}

/// Number of records of a bug that carry a fused score.
pub fn count_fused(conn: &Connection, bug_id: &BugId) -> Result<usize, StorageError> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM signal_records WHERE bug_id = ?1 AND fused_final IS NOT NULL",
            params![bug_id.as_str()],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;
    Ok(count as usize)
}
