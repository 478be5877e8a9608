//! Storage configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Where the signal store lives.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database path. Default: "bugloc.db".
    pub db_path: Option<String>,
    /// Read connections for file-backed stores. Default: 4.
    pub read_pool_size: Option<usize>,
}

impl StorageConfig {
    pub fn effective_db_path(&self) -> &str {
        self.db_path.as_deref().unwrap_or(constants::DEFAULT_DB_PATH)
    }

    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(constants::DEFAULT_READ_POOL_SIZE)
    }
}
