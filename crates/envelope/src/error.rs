//! Error taxonomy of the envelope layer.

use common::ServiceError;
use thiserror::Error;

use crate::crypto::cipher::CipherError;
use crate::keys::KeyError;

/// Why an envelope string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The string did not split into exactly three `$`-separated fields.
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),

    /// A field that must carry data was empty.
    #[error("{0} field is empty")]
    EmptyField(&'static str),

    /// A field was not valid standard base64.
    #[error("{0} field is not valid base64")]
    InvalidBase64(&'static str),

    /// The IV field did not decode to 16 bytes.
    #[error("iv must be 16 bytes, got {0}")]
    InvalidIvLength(usize),

    /// An encrypted payload was not UTF-8 text.
    #[error("payload is not text")]
    NotText,
}

/// Errors produced while sealing or opening an envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The envelope is malformed.
    #[error("could not parse encrypted payload: {0}")]
    Format(#[from] FormatError),

    /// The shared key could not be recovered (wrong private key or corrupted key field).
    #[error("decryption failed")]
    Decryption,

    /// RSA key-wrap failed (e.g. recipient key too small for the payload).
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// The OS random source failed.
    #[error("random number generator failure")]
    RngFailure,

    /// Symmetric stage rejected its key or IV.
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// Supplied key material could not be parsed.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Key material needed for the operation was not supplied.
    #[error("key unavailable: {0}")]
    KeyUnavailable(String),
}

impl From<EnvelopeError> for ServiceError {
    fn from(e: EnvelopeError) -> Self {
        match e {
            EnvelopeError::Format(f) => ServiceError::MalformedPayload(f.to_string()),
            EnvelopeError::Decryption => ServiceError::DecryptionFailure("key unwrap failed".into()),
            EnvelopeError::Encryption(msg) => ServiceError::EncryptionFailure(msg),
            EnvelopeError::RngFailure => ServiceError::EncryptionFailure("rng failure".into()),
            EnvelopeError::Cipher(c) => ServiceError::Internal(c.to_string()),
            EnvelopeError::Key(k) => ServiceError::InvalidKey(k.to_string()),
            EnvelopeError::KeyUnavailable(msg) => ServiceError::KeyUnavailable(msg),
        }
    }
}
