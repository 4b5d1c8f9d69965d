//! Logging initialization.
//!
//! Diagnostics go to stderr so rendered HTML on stdout stays clean.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Default filter for a `-v` count.
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "wikidiff=warn",
        1 => "wikidiff=info",
        2 => "wikidiff=debug",
        _ => "wikidiff=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `verbosity`.
/// Later calls are no-ops.
pub fn init(verbosity: u8) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
