//! Per-bug processing stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a bug is in its fusion pass.
///
/// `Pending → Fetched → Normalized → Combined → Persisted | PartiallyFailed`.
/// There is no retry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugStage {
    Pending,
    Fetched,
    Normalized,
    Combined,
    /// Every record written.
    Persisted,
    /// At least one record affected zero rows.
    PartiallyFailed,
}

impl BugStage {
    /// Terminal stages end a bug's pass.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Persisted | Self::PartiallyFailed)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetched => "fetched",
            Self::Normalized => "normalized",
            Self::Combined => "combined",
            Self::Persisted => "persisted",
            Self::PartiallyFailed => "partially_failed",
        }
    }
}

impl fmt::Display for BugStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
