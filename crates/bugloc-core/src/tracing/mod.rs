//! Observability for bugloc.
//! `tracing` crate with `EnvFilter`, per-module log levels.

pub mod metrics;
pub mod setup;

pub use setup::init_tracing;
