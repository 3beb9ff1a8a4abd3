//! AES-256 in CTR mode.
//!
//! The counter block is the full 128-bit IV, incremented big-endian. This is
//! the layout the counterpart implementations on the node and server side use;
//! a 64-bit or little-endian counter would only agree for the first 2^64
//! blocks, or not at all.
//!
//! CTR is a stream mode: no padding, ciphertext length equals plaintext length,
//! and decryption is the same operation as encryption.

use aes::cipher::{KeyIvInit, StreamCipher};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the CTR initial counter block (16 bytes = 128 bits).
pub const IV_LEN: usize = 16;

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid AES key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The IV is the wrong length (must be [`IV_LEN`] bytes).
    #[error("invalid IV length: expected {IV_LEN} bytes, got {0}")]
    InvalidIvLength(usize),
}

/// XOR `data` with the AES-256-CTR keystream for `key` and `iv`.
///
/// Encrypts plaintext and decrypts ciphertext alike.
///
/// # Errors
///
/// Returns [`CipherError`] if `key` or `iv` has the wrong length.
pub fn apply_keystream(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength(key.len()));
    }
    if iv.len() != IV_LEN {
        return Err(CipherError::InvalidIvLength(iv.len()));
    }
    let mut cipher = Aes256Ctr::new_from_slices(key, iv)
        .map_err(|_| CipherError::InvalidKeyLength(key.len()))?;
    let mut buf = data.to_vec();
    cipher.apply_keystream(&mut buf);
    Ok(buf)
}
