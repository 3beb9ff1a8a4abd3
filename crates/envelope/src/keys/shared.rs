//! [`SharedKey`]: the per-message AES-256 key.

use std::fmt;

use zeroize::Zeroize;

use crate::crypto::KEY_LEN;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// Created fresh for each envelope, never reused. The memory is zeroed on
/// drop to shorten the time plaintext key material lives in RAM.
pub struct SharedKey(Box<[u8; KEY_LEN]>);

impl SharedKey {
    pub(crate) fn zeroed() -> Self {
        Self(Box::new([0u8; KEY_LEN]))
    }

    /// Copy `bytes` into a new key.
    ///
    /// Returns `None` unless `bytes` is exactly [`KEY_LEN`] long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != KEY_LEN {
            return None;
        }
        let mut key = Self::zeroed();
        key.0.copy_from_slice(bytes);
        Some(key)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.0
    }
}

impl Drop for SharedKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("SharedKey([REDACTED])")
    }
}
