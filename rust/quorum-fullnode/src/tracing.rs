//! Helpers to wrangle logging for consumers of this SDK.
//! NOTE: [initialize_tracing] should only ever be called in tests or binaries;
//! a library should only concern itself with instrumentation and logging.

use std::sync::Once;

static INITIALIZE_TRACING: Once = Once::new();

pub fn initialize_tracing() {
    use tracing_subscriber::prelude::*;
    INITIALIZE_TRACING.call_once(|| {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| "quorum_fullnode=debug".into()),
            ))
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}
