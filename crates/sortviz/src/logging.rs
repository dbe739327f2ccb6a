//! Diagnostic logging setup.
//!
//! Frames go to stdout; logs go to stderr so the two can be piped apart.

use tracing_subscriber::EnvFilter;

use crate::error::{Result, SortvizError};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SORTVIZ_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Build the filter from `SORTVIZ_LOG`, falling back to `warn`. `verbose`
/// raises the fallback to `debug`.
#[must_use]
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { DEFAULT_DIRECTIVE })
    })
}

/// Install the global subscriber.
pub fn init(verbose: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| SortvizError::Logging {
            message: err.to_string(),
        })
}
