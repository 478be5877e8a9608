//! Span names shared by the fusion crates.

/// Span wrapping one fusion run.
pub const FUSION_RUN_SPAN: &str = "bugloc.fusion_run";

/// Span wrapping one bug's fetch → persist pass.
pub const FUSE_BUG_SPAN: &str = "bugloc.fuse_bug";
