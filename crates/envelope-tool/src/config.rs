//! Configuration loading and validation for `envelope-tool`.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if any required variable is missing or
//! invalid.

use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

/// Which direction the tool runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Seal the input file for one recipient.
    Encrypt,
    /// Open a sealed input or result file.
    Decrypt,
}

#[derive(Debug, Error)]
#[error("MODE must be `encrypt` or `decrypt`, got `{0}`")]
pub struct UnknownMode(String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encrypt" => Ok(Self::Encrypt),
            "decrypt" => Ok(Self::Decrypt),
            _ => Err(UnknownMode(s.to_owned())),
        }
    }
}

/// Validated tool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `encrypt` or `decrypt`. **Required.**
    pub mode: String,

    /// File holding the payload (encrypt) or the sealed text (decrypt). **Required.**
    pub input_path: String,

    /// File the result is written to. **Required.**
    pub output_path: String,

    /// PEM public key of the recipient organization. Required to encrypt for
    /// an encrypted collaboration.
    #[serde(default)]
    pub public_key_path: Option<String>,

    /// PEM private key of the caller. Required to decrypt for an encrypted
    /// collaboration.
    #[serde(default)]
    pub private_key_path: Option<String>,

    /// Whether the collaboration is encrypted. When `false` the envelope is
    /// bypassed and payloads are copied through unchanged.
    #[serde(default = "default_collaboration_encrypted")]
    pub collaboration_encrypted: bool,

    /// The public key file holds the server's base64-wrapped PEM.
    #[serde(default)]
    pub public_key_base64: bool,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_collaboration_encrypted() -> bool {
    true
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The parsed [`Mode`].
    pub fn mode(&self) -> Result<Mode, UnknownMode> {
        self.mode.parse()
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        let mode = self.mode()?;
        ensure_non_empty(&self.input_path, "INPUT_PATH")?;
        ensure_non_empty(&self.output_path, "OUTPUT_PATH")?;

        if self.collaboration_encrypted {
            match mode {
                Mode::Encrypt => ensure_present(&self.public_key_path, "PUBLIC_KEY_PATH")?,
                Mode::Decrypt => ensure_present(&self.private_key_path, "PRIVATE_KEY_PATH")?,
            }
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

fn ensure_present(value: &Option<String>, name: &str) -> Result<()> {
    match value {
        Some(v) => ensure_non_empty(v, name),
        None => anyhow::bail!("{name} is required for an encrypted collaboration"),
    }
}
