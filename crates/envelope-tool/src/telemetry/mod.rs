//! Telemetry initialisation for `envelope-tool`.
//!
//! Structured JSON logs only. No key material, payload bytes, or envelope
//! text may appear in any log field; events carry sizes, modes and framing
//! tags.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber.
///
/// Outputs structured JSON logs to stderr at the configured log level;
/// `RUST_LOG` takes precedence when set.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise envelope-tool tracing subscriber: {e}"))
}
