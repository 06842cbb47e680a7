//! Logging initialization.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset; keeps the interactive session quiet.
pub const DEFAULT_FILTER: &str = "clinic_core=warn,clinic_cli=warn";

static INIT_ONCE: Once = Once::new();

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init() {
    INIT_ONCE.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
