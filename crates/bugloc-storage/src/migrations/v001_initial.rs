//! v001: bugs and per-candidate signal records.
//!
//! Raw signal columns are written by upstream producers only. A fusion pass
//! writes the normalized and fused columns, which are NULL until then.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS bugs (
    bug_id TEXT PRIMARY KEY,
    product TEXT NOT NULL,
    fixed_date TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_bugs_product ON bugs(product, fixed_date);

CREATE TABLE IF NOT EXISTS signal_records (
    bug_id TEXT NOT NULL,
    candidate_id INTEGER NOT NULL,
    code_similarity REAL NOT NULL DEFAULT 0,
    bug_similarity REAL NOT NULL DEFAULT 0,
    stack_trace REAL NOT NULL DEFAULT 0,
    commit_log REAL NOT NULL DEFAULT 0,
    normalized_code REAL,
    normalized_bug REAL,
    fused_intermediate REAL,
    fused_final REAL,
    PRIMARY KEY (bug_id, candidate_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_signal_records_rank
    ON signal_records(bug_id, fused_final DESC);
";
