//! Configuration system for bugloc.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod bugloc_config;
pub mod fusion_config;
pub mod storage_config;

pub use bugloc_config::{BuglocConfig, CliOverrides, RunSettings};
pub use fusion_config::FusionConfig;
pub use storage_config::StorageConfig;
