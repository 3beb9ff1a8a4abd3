//! Collaboration-level encryption switch and per-organization sealing.
//!
//! Whether a collaboration is encrypted is a flag the caller reads from the
//! collaboration record and passes in as an [`EncryptionMode`]. It is never
//! guessed from the shape of a payload.
//!
//! - [`EncryptionMode::Encrypted`]: [`seal`] returns the envelope text as bytes
//!   and [`unseal`] opens it (see [`crate::codec`]);
//! - [`EncryptionMode::Plain`]: both are the identity and return their input
//!   unchanged.
//!
//! Turning sealed bytes into the `input` string of a task creation request is
//! the task protocol's job: [`seal_for_organizations`] carries plain payloads
//! as base64 text via [`common::protocol::encode_plain`] and envelopes verbatim.

use async_trait::async_trait;
use common::protocol::{encode_plain, OrganizationInput};
use tracing::{debug, info};

use crate::codec;
use crate::error::{EnvelopeError, FormatError};
use crate::keys::{PrivateKeyPem, PrivateKeyStore, PublicKeyPem};

/// Whether payloads of a collaboration travel inside envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionMode {
    /// Payloads are sealed per recipient organization.
    Encrypted,
    /// Payloads pass through untouched.
    Plain,
}

impl EncryptionMode {
    /// Map the collaboration's `encrypted` flag to a mode.
    pub fn from_flag(encrypted: bool) -> Self {
        if encrypted {
            Self::Encrypted
        } else {
            Self::Plain
        }
    }
}

/// Supplies the public key of a recipient organization.
///
/// Implemented by the caller over whatever key-retrieval service it talks to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicKeySource: Send + Sync {
    /// Fetch the public key registered for `organization_id`.
    async fn public_key(&self, organization_id: u64) -> Result<PublicKeyPem, EnvelopeError>;
}

/// Seal `payload` for a single recipient.
///
/// # Errors
///
/// Returns [`EnvelopeError::KeyUnavailable`] if the mode is encrypted and no
/// recipient key is given, or any error of [`codec::encrypt`].
pub fn seal(
    mode: EncryptionMode,
    payload: &[u8],
    recipient: Option<&PublicKeyPem>,
) -> Result<Vec<u8>, EnvelopeError> {
    match mode {
        EncryptionMode::Plain => Ok(payload.to_vec()),
        EncryptionMode::Encrypted => {
            let recipient = recipient.ok_or_else(|| {
                EnvelopeError::KeyUnavailable("recipient public key required".into())
            })?;
            codec::encrypt(payload, recipient).map(String::into_bytes)
        }
    }
}

/// Open a task input or result.
///
/// Surrounding ASCII whitespace around an envelope (e.g. a trailing newline
/// from a file) is ignored. Plain payloads are returned byte for byte.
///
/// # Errors
///
/// Returns [`EnvelopeError::KeyUnavailable`] if the mode is encrypted and no
/// private key is given, [`EnvelopeError::Format`] if an encrypted payload is
/// not text, or any error of [`codec::decrypt`].
pub fn unseal(
    mode: EncryptionMode,
    payload: &[u8],
    private_key: Option<&PrivateKeyPem>,
) -> Result<Vec<u8>, EnvelopeError> {
    match mode {
        EncryptionMode::Plain => Ok(payload.to_vec()),
        EncryptionMode::Encrypted => {
            let private_key = private_key.ok_or_else(|| {
                EnvelopeError::KeyUnavailable("private key required to decrypt".into())
            })?;
            let text = std::str::from_utf8(payload).map_err(|_| FormatError::NotText)?;
            codec::decrypt(text.trim(), private_key)
        }
    }
}

/// [`unseal`] with the private key taken from the session store.
///
/// Plain collaborations never touch the store.
///
/// # Errors
///
/// Same as [`unseal`]; an empty store is [`EnvelopeError::KeyUnavailable`].
pub async fn unseal_with_store(
    mode: EncryptionMode,
    payload: &[u8],
    store: &PrivateKeyStore,
) -> Result<Vec<u8>, EnvelopeError> {
    match mode {
        EncryptionMode::Plain => unseal(mode, payload, None),
        EncryptionMode::Encrypted => {
            let private_key = store.current().await?;
            unseal(mode, payload, Some(private_key.as_ref()))
        }
    }
}

/// Seal one copy of `payload` per recipient organization.
///
/// Each copy gets its own shared key and IV. Keys are fetched only for
/// encrypted collaborations. The output keeps the order of `organization_ids`.
///
/// # Errors
///
/// Aborts on the first key lookup or sealing failure.
pub async fn seal_for_organizations(
    mode: EncryptionMode,
    payload: &[u8],
    organization_ids: &[u64],
    keys: &dyn PublicKeySource,
) -> Result<Vec<OrganizationInput>, EnvelopeError> {
    let mut inputs = Vec::with_capacity(organization_ids.len());
    for &id in organization_ids {
        let input = match mode {
            EncryptionMode::Plain => encode_plain(&seal(mode, payload, None)?),
            EncryptionMode::Encrypted => {
                let recipient = keys.public_key(id).await?;
                debug!(organization_id = id, key_bits = recipient.size_bits(), "sealing input");
                envelope_text(seal(mode, payload, Some(&recipient))?)?
            }
        };
        inputs.push(OrganizationInput { id, input });
    }
    info!(?mode, organizations = inputs.len(), "task inputs prepared");
    Ok(inputs)
}

// Envelopes are base64 fields joined by `$`, always ASCII.
fn envelope_text(sealed: Vec<u8>) -> Result<String, EnvelopeError> {
    String::from_utf8(sealed).map_err(|_| EnvelopeError::Encryption("envelope is not ASCII".into()))
}
