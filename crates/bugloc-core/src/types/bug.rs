//! Bug reports as seen by the fusion engine.

use serde::{Deserialize, Serialize};

use super::BugId;

/// A bug report. Only `id` feeds fusion; `fixed_date` orders processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bug {
    pub id: BugId,
    pub product: String,
    /// Fix date as an ISO-8601 string, when known.
    pub fixed_date: Option<String>,
}

impl Bug {
    pub fn new(id: impl Into<BugId>, product: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            product: product.into(),
            fixed_date: None,
        }
    }

    pub fn with_fixed_date(mut self, fixed_date: impl Into<String>) -> Self {
        self.fixed_date = Some(fixed_date.into());
        self
    }
}

/// Order in which a bug source returns bugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugOrder {
    #[default]
    Unordered,
    /// Oldest fix first; bugs without a fix date come last.
    ByFixedDate,
}
