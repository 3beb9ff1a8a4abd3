//! RSA PKCS#1 v1.5 wrapping of the per-message shared key.

use rand::rngs::OsRng;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::error::EnvelopeError;

/// Encrypt `payload` to `recipient` with PKCS#1 v1.5 padding.
///
/// The recipient modulus must leave room for the padding: `payload.len()`
/// may be at most `modulus_bytes - 11`.
///
/// # Errors
///
/// Returns [`EnvelopeError::Encryption`] if the payload does not fit or the
/// padding RNG fails.
pub fn wrap_key(recipient: &RsaPublicKey, payload: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    recipient
        .encrypt(&mut OsRng, Pkcs1v15Encrypt, payload)
        .map_err(|e| EnvelopeError::Encryption(e.to_string()))
}

/// Decrypt a PKCS#1 v1.5 ciphertext with `private_key`.
///
/// # Errors
///
/// Returns [`EnvelopeError::Decryption`] on any failure. The cause is not
/// exposed so that callers cannot be used as a padding oracle.
pub fn unwrap_key(
    private_key: &RsaPrivateKey,
    wrapped: &[u8],
) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
    private_key
        .decrypt(Pkcs1v15Encrypt, wrapped)
        .map(Zeroizing::new)
        .map_err(|_| EnvelopeError::Decryption)
}
