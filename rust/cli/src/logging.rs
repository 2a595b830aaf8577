//! Diagnostic logging setup.
//!
//! Engine and CLI events go through `tracing`. Logs are written to stderr so
//! they never mix with table output; the level comes from `RUST_LOG` and
//! defaults to warnings only.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Initialize logging for the binary. Safe to call more than once; later
/// calls keep the first subscriber.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
