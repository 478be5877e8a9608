//! Top-level fusion run errors.

use super::error_code::{self, BuglocErrorCode};
use super::{ConfigError, StorageError};

/// Errors that abort a fusion run as a whole.
///
/// Per-record and per-bug store failures never surface here; they are
/// counted in the run report instead.
#[derive(Debug, thiserror::Error)]
pub enum FusionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Fusion run cancelled")]
    Cancelled,
}

impl BuglocErrorCode for FusionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::WorkerPool(_) => error_code::WORKER_POOL_ERROR,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
