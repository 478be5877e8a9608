//! Newtype identifiers for bugs and candidates.
//!
//! A `BugId` cannot be passed where a `CandidateId` is expected. Candidate
//! ids identify a source file at one specific revision, so the same path at
//! two commits is two distinct candidates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bug report identifier. Numeric ids from bug trackers are kept as their
/// decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BugId(pub String);

impl BugId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BugId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BugId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for BugId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// Revision-scoped source file identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CandidateId(pub i64);

impl CandidateId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner value.
    pub fn inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CandidateId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
