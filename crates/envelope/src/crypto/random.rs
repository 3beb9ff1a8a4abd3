//! Fresh per-message key material from the OS CSPRNG.
//!
//! There is no fallback source: if the OS RNG fails, sealing fails.

use rand::{rngs::OsRng, RngCore};

use super::cipher::IV_LEN;
use crate::error::EnvelopeError;
use crate::keys::SharedKey;

/// Draw a fresh 256-bit shared key.
///
/// # Errors
///
/// Returns [`EnvelopeError::RngFailure`] if the OS RNG fails.
pub fn fresh_shared_key() -> Result<SharedKey, EnvelopeError> {
    let mut key = SharedKey::zeroed();
    OsRng
        .try_fill_bytes(key.as_mut_bytes())
        .map_err(|_| EnvelopeError::RngFailure)?;
    Ok(key)
}

/// Draw a fresh 128-bit IV.
///
/// # Errors
///
/// Returns [`EnvelopeError::RngFailure`] if the OS RNG fails.
pub fn fresh_iv() -> Result<[u8; IV_LEN], EnvelopeError> {
    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|_| EnvelopeError::RngFailure)?;
    Ok(iv)
}
