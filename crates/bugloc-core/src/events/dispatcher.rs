//! EventDispatcher: synchronous fan-out to registered handlers.

use std::sync::Arc;

use super::handler::FusionEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// A panicking handler is logged and does not stop delivery to the others.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn FusionEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn FusionEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn emit<F: Fn(&dyn FusionEventHandler)>(&self, name: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!(event = name, "event handler panicked");
            }
        }
    }

    pub fn emit_run_started(&self, event: &RunStartedEvent) {
        self.emit("run_started", |h| h.on_run_started(event));
    }

    pub fn emit_bug_completed(&self, event: &BugCompletedEvent) {
        self.emit("bug_completed", |h| h.on_bug_completed(event));
    }

    pub fn emit_persistence_miss(&self, event: &PersistenceMissEvent) {
        self.emit("persistence_miss", |h| h.on_persistence_miss(event));
    }

    pub fn emit_bug_failed(&self, event: &BugFailedEvent) {
        self.emit("bug_failed", |h| h.on_bug_failed(event));
    }

    pub fn emit_run_complete(&self, event: &RunCompleteEvent) {
        self.emit("run_complete", |h| h.on_run_complete(event));
    }
}
