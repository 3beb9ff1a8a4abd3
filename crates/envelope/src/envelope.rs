//! The three-field wire value.
//!
//! ```text
//! <base64(encrypted key)>$<base64(iv)>$<base64(ciphertext)>
//! ```
//!
//! All fields use standard base64 with padding. `$` is outside that alphabet,
//! so a well-formed envelope contains exactly two delimiters.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::crypto::IV_LEN;
use crate::error::FormatError;

/// Field separator.
pub const DELIMITER: char = '$';

/// Whether a layer was wrapped in an extra base64 encoding before encryption.
///
/// Two producer variants exist: the one that base64-encodes the shared key
/// (and the message) before encrypting it, and the one that encrypts the raw
/// bytes. Decryption detects which one it is looking at per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Encrypted bytes are the base64 text of the real value.
    DoubleEncoded,
    /// Encrypted bytes are the real value.
    SingleEncoded,
}

/// Framing choice for each encrypted layer of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeFraming {
    /// Framing of the shared key inside the RSA layer.
    pub key: Framing,
    /// Framing of the payload inside the AES layer.
    pub message: Framing,
}

impl Default for EnvelopeFraming {
    fn default() -> Self {
        Self {
            key: Framing::DoubleEncoded,
            message: Framing::DoubleEncoded,
        }
    }
}

/// A parsed envelope. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// RSA PKCS#1 v1.5 ciphertext of the (framed) shared key.
    pub encrypted_key: Vec<u8>,
    /// Initial CTR counter block.
    pub iv: [u8; IV_LEN],
    /// AES-256-CTR ciphertext of the (framed) payload.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encode to the wire string.
    pub fn to_wire(&self) -> String {
        format!(
            "{}{DELIMITER}{}{DELIMITER}{}",
            STANDARD.encode(&self.encrypted_key),
            STANDARD.encode(self.iv),
            STANDARD.encode(&self.ciphertext),
        )
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl FromStr for Envelope {
    type Err = FormatError;

    /// Parse a wire string.
    ///
    /// The key and IV fields must be non-empty. The ciphertext field is the
    /// one exception to the non-empty rule: CTR output is as long as its
    /// input and `base64("")` is `""`, so the empty payload seals to an empty
    /// ciphertext field and must still parse. A missing field is caught by
    /// the field count, not by emptiness.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(DELIMITER).collect();
        let [key_field, iv_field, ciphertext_field] = fields[..] else {
            return Err(FormatError::FieldCount(fields.len()));
        };
        if key_field.is_empty() {
            return Err(FormatError::EmptyField("key"));
        }
        if iv_field.is_empty() {
            return Err(FormatError::EmptyField("iv"));
        }

        let encrypted_key = STANDARD
            .decode(key_field)
            .map_err(|_| FormatError::InvalidBase64("key"))?;
        let iv_bytes = STANDARD
            .decode(iv_field)
            .map_err(|_| FormatError::InvalidBase64("iv"))?;
        let iv: [u8; IV_LEN] = iv_bytes
            .as_slice()
            .try_into()
            .map_err(|_| FormatError::InvalidIvLength(iv_bytes.len()))?;
        let ciphertext = STANDARD
            .decode(ciphertext_field)
            .map_err(|_| FormatError::InvalidBase64("ciphertext"))?;

        Ok(Self {
            encrypted_key,
            iv,
            ciphertext,
        })
    }
}
