//! # bugloc-storage
//!
//! SQLite persistence for bug reports and per-candidate signal records.
//! Single write connection behind a mutex, round-robin read pool,
//! `user_version` migrations, and a `SqliteStore` implementing the
//! `BugSource` and `SignalStore` traits.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod store;

pub use connection::DatabaseManager;
pub use store::SqliteStore;
