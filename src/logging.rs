//! Diagnostic logging on stderr.
//!
//! Operator-facing output goes to stdout; `tracing` events are for debugging
//! a run and stay quiet unless `COMPDB_LINK_LOG` asks for them.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "COMPDB_LINK_LOG";

/// Installs the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
