//! Trait seams between the fusion engine and its collaborators.

pub mod cancellation;
pub mod store;

pub use cancellation::{Cancellable, CancellationToken};
pub use store::{BugSource, SignalStore};
