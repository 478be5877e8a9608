//! Shared constants for the bugloc fusion engine.

/// bugloc version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default text-vs-history blend weight.
pub const DEFAULT_ALPHA: f64 = 0.2;

/// Default commit-log weight.
pub const DEFAULT_BETA: f64 = 0.2;

/// Default number of fusion workers. Sequential unless configured otherwise.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Upper bound on fusion workers.
pub const MAX_CONCURRENCY: usize = 64;

/// Fallback value for a normalized signal whose range collapsed to a point.
pub const DEGENERATE_NORMALIZED_VALUE: f64 = 0.0;

/// Default SQLite database path.
pub const DEFAULT_DB_PATH: &str = "bugloc.db";

/// Default number of read connections.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "bugloc.toml";

/// Capacity of the channel carrying per-bug outcomes back to the aggregator.
pub const OUTCOME_CHANNEL_CAPACITY: usize = 256;

/// Default number of candidates returned by a ranking query.
pub const DEFAULT_TOP_K: usize = 10;
