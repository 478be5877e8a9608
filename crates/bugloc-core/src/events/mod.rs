//! Fusion run events: handler trait, payloads, and dispatcher.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::FusionEventHandler;
