//! BuglocErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// that callers (CLI exit reporting, JSON reports) can match on.
pub trait BuglocErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
pub const WORKER_POOL_ERROR: &str = "WORKER_POOL_ERROR";
pub const CANCELLED: &str = "CANCELLED";
