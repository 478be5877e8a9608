//! # bugloc-core
//!
//! Foundation crate for the bugloc score fusion engine.
//! Defines the signal record model, the store traits, errors, config,
//! events, tracing setup, and constants. Every other crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::BuglocConfig;
pub use errors::{ConfigError, FusionError, StorageError};
pub use types::{Bug, BugId, CandidateId, CandidateSignals, SignalRecord};
