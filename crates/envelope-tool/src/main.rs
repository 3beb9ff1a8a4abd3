//! `envelope-tool`: seal or open a task payload file.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Read the key and payload files, run the envelope operation, write the output.

mod config;
mod run;
mod telemetry;

use anyhow::Result;
use common::ServiceError;
use tracing::{error, info};

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = %cfg.mode,
        encrypted = cfg.collaboration_encrypted,
        "envelope-tool starting"
    );

    // -----------------------------------------------------------------------
    // 3. Envelope operation
    // -----------------------------------------------------------------------
    if let Err(e) = run::run(&cfg).await {
        if let Some(service) = e.downcast_ref::<ServiceError>() {
            error!(error = %service, "{}", service.user_message());
            std::process::exit(service.exit_code());
        }
        return Err(e);
    }
    Ok(())
}
