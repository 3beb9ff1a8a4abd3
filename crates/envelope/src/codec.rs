//! Sealing and opening of envelopes.
//!
//! # Sealing
//!
//! 1. Draw a fresh 32-byte shared key and 16-byte IV.
//! 2. AES-256-CTR the (framed) payload under that key and IV.
//! 3. RSA PKCS#1 v1.5 wrap the (framed) shared key for the recipient.
//! 4. Join the three base64 fields with `$`.
//!
//! With the default [`EnvelopeFraming`] both layers are double-encoded: the
//! RSA layer carries `base64(shared_key)` and the AES layer carries
//! `base64(payload)`.
//!
//! # Opening
//!
//! Each encrypted layer is resolved by an explicit two-way decision recorded
//! as a [`Framing`] in [`Opened`]:
//!
//! - key layer: `DoubleEncoded` if the RSA output is base64 text of exactly 32
//!   bytes, else `SingleEncoded` if the RSA output is itself 32 bytes, else
//!   the unwrap is rejected as [`EnvelopeError::Decryption`];
//! - message layer: `DoubleEncoded` if the AES output is valid base64, else
//!   `SingleEncoded` and the AES output is returned verbatim.
//!
//! A single-encoded payload that happens to be valid base64 text is read as
//! double-encoded. Producers that skip the message framing must not send such
//! payloads.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{cipher, keywrap, random};
use crate::envelope::{Envelope, EnvelopeFraming, Framing};
use crate::error::EnvelopeError;
use crate::keys::{PrivateKeyPem, PublicKeyPem, SharedKey};

/// Result of [`open`]: the payload and how each layer was framed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opened {
    /// Recovered payload bytes.
    pub plaintext: Vec<u8>,
    /// Framing detected in the RSA layer.
    pub key_framing: Framing,
    /// Framing detected in the AES layer.
    pub message_framing: Framing,
}

/// Seal `plaintext` for the holder of `recipient`'s private key.
///
/// Precondition: `recipient` is large enough to wrap the framed key under
/// PKCS#1 v1.5 (2048-bit moduli and up in practice). Smaller keys surface as
/// [`EnvelopeError::Encryption`] from the RSA layer.
///
/// # Errors
///
/// Returns [`EnvelopeError::RngFailure`] if the OS RNG fails, or
/// [`EnvelopeError::Encryption`] if RSA wrapping fails.
pub fn encrypt(plaintext: &[u8], recipient: &PublicKeyPem) -> Result<String, EnvelopeError> {
    encrypt_with(plaintext, recipient, EnvelopeFraming::default())
}

/// Seal `plaintext` with an explicit framing for each layer.
///
/// # Errors
///
/// Same as [`encrypt`].
pub fn encrypt_with(
    plaintext: &[u8],
    recipient: &PublicKeyPem,
    framing: EnvelopeFraming,
) -> Result<String, EnvelopeError> {
    let shared_key = random::fresh_shared_key()?;
    let iv = random::fresh_iv()?;

    let message = Zeroizing::new(match framing.message {
        Framing::DoubleEncoded => STANDARD.encode(plaintext).into_bytes(),
        Framing::SingleEncoded => plaintext.to_vec(),
    });
    let ciphertext = cipher::apply_keystream(shared_key.as_bytes(), &iv, &message)?;

    let key_payload = Zeroizing::new(match framing.key {
        Framing::DoubleEncoded => STANDARD.encode(shared_key.as_bytes()).into_bytes(),
        Framing::SingleEncoded => shared_key.as_bytes().to_vec(),
    });
    let encrypted_key = keywrap::wrap_key(recipient.as_rsa(), &key_payload)?;

    let envelope = Envelope {
        encrypted_key,
        iv,
        ciphertext,
    };
    debug!(
        plaintext_len = plaintext.len(),
        key_framing = ?framing.key,
        message_framing = ?framing.message,
        "sealed envelope"
    );
    Ok(envelope.to_wire())
}

/// Open `envelope` with `private_key` and return the payload.
///
/// A wrong private key is almost always rejected in the RSA layer. The AES
/// layer has no integrity tag, so a corrupted ciphertext field yields wrong
/// bytes rather than an error.
///
/// # Errors
///
/// Returns [`EnvelopeError::Format`] for a malformed envelope, or
/// [`EnvelopeError::Decryption`] if the shared key cannot be recovered.
pub fn decrypt(envelope: &str, private_key: &PrivateKeyPem) -> Result<Vec<u8>, EnvelopeError> {
    open(envelope, private_key).map(|opened| opened.plaintext)
}

/// Like [`decrypt`], also reporting the framing detected in each layer.
///
/// # Errors
///
/// Same as [`decrypt`].
pub fn open(envelope: &str, private_key: &PrivateKeyPem) -> Result<Opened, EnvelopeError> {
    let parsed: Envelope = envelope.parse()?;

    let key_payload = keywrap::unwrap_key(private_key.as_rsa(), &parsed.encrypted_key)?;
    let (shared_key, key_framing) = resolve_shared_key(&key_payload)?;

    let message = Zeroizing::new(cipher::apply_keystream(
        shared_key.as_bytes(),
        &parsed.iv,
        &parsed.ciphertext,
    )?);
    let (plaintext, message_framing) = resolve_message(&message);

    debug!(
        ciphertext_len = parsed.ciphertext.len(),
        ?key_framing,
        ?message_framing,
        "opened envelope"
    );
    Ok(Opened {
        plaintext,
        key_framing,
        message_framing,
    })
}

fn resolve_shared_key(payload: &[u8]) -> Result<(SharedKey, Framing), EnvelopeError> {
    if let Ok(decoded) = STANDARD.decode(payload) {
        let decoded = Zeroizing::new(decoded);
        if let Some(key) = SharedKey::from_slice(&decoded) {
            return Ok((key, Framing::DoubleEncoded));
        }
    }
    SharedKey::from_slice(payload)
        .map(|key| (key, Framing::SingleEncoded))
        .ok_or(EnvelopeError::Decryption)
}

fn resolve_message(message: &[u8]) -> (Vec<u8>, Framing) {
    match STANDARD.decode(message) {
        Ok(decoded) => (decoded, Framing::DoubleEncoded),
        Err(_) => (message.to_vec(), Framing::SingleEncoded),
    }
}
