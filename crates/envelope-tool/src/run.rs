//! File-to-file envelope operation.

use anyhow::{Context, Result};
use common::ServiceError;
use envelope::collaboration::{self, EncryptionMode};
use envelope::{EnvelopeError, PrivateKeyPem, PrivateKeyStore, PublicKeyPem};
use tracing::info;
use zeroize::Zeroizing;

use crate::config::{Config, Mode};

/// Run the configured operation.
///
/// Crypto-layer failures are returned as [`ServiceError`] so `main` can map
/// them to an exit code; I/O failures carry file context.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written, a key does not
/// parse, or the envelope operation fails.
pub async fn run(cfg: &Config) -> Result<()> {
    let mode = EncryptionMode::from_flag(cfg.collaboration_encrypted);
    let input = tokio::fs::read(&cfg.input_path)
        .await
        .with_context(|| format!("failed to read input file {}", cfg.input_path))?;

    let output = match cfg.mode()? {
        Mode::Encrypt => {
            let recipient = match mode {
                EncryptionMode::Encrypted => Some(load_public_key(cfg).await?),
                EncryptionMode::Plain => None,
            };
            collaboration::seal(mode, &input, recipient.as_ref()).map_err(ServiceError::from)?
        }
        Mode::Decrypt => {
            let store = PrivateKeyStore::new();
            if mode == EncryptionMode::Encrypted {
                store.store(load_private_key(cfg).await?).await;
            }
            collaboration::unseal_with_store(mode, &input, &store)
                .await
                .map_err(ServiceError::from)?
        }
    };

    tokio::fs::write(&cfg.output_path, &output)
        .await
        .with_context(|| format!("failed to write output file {}", cfg.output_path))?;
    info!(?mode, input_len = input.len(), output_len = output.len(), "done");
    Ok(())
}

async fn load_public_key(cfg: &Config) -> Result<PublicKeyPem> {
    let path = cfg
        .public_key_path
        .as_deref()
        .ok_or_else(|| ServiceError::KeyUnavailable("PUBLIC_KEY_PATH not set".into()))?;
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read public key file {path}"))?;
    let parsed = if cfg.public_key_base64 {
        PublicKeyPem::from_base64_pem(&text)
    } else {
        PublicKeyPem::from_pem(&text)
    };
    Ok(parsed.map_err(|e| ServiceError::from(EnvelopeError::from(e)))?)
}

async fn load_private_key(cfg: &Config) -> Result<PrivateKeyPem> {
    let path = cfg
        .private_key_path
        .as_deref()
        .ok_or_else(|| ServiceError::KeyUnavailable("PRIVATE_KEY_PATH not set".into()))?;
    let text = Zeroizing::new(
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read private key file {path}"))?,
    );
    Ok(PrivateKeyPem::from_pem(&text).map_err(|e| ServiceError::from(EnvelopeError::from(e)))?)
}
