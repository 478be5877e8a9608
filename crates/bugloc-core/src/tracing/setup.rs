//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "BUGLOC_LOG";

/// Filter used when `BUGLOC_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "bugloc=info";

/// Initialize the bugloc tracing/logging system.
///
/// Reads `BUGLOC_LOG` for per-module log levels, e.g.
/// `BUGLOC_LOG=bugloc_fusion=debug,bugloc_storage=warn`.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A host process may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}
