//! Logging
//!
//! Installs a `tracing` subscriber writing to stderr, so command output on
//! stdout stays clean. `VTERM_LOG` overrides the configured filter.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive.
pub const LOG_ENV: &str = "VTERM_LOG";

pub const DEFAULT_LEVEL: &str = "warn";

/// Build the filter: `VTERM_LOG` first, then `level`, then `warn`.
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Initialize the global subscriber. Fails if one is already installed.
pub fn init_logging(level: Option<&str>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
}
