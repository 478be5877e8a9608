//! Error handling for bugloc.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod fusion_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::BuglocErrorCode;
pub use fusion_error::FusionError;
pub use storage_error::StorageError;
