//! Common error types shared across crates.

use thiserror::Error;

/// Caller-facing error type.
///
/// Variants map to the process exit codes returned by `envelope-tool`:
/// - [`ServiceError::MalformedPayload`] → 65
/// - [`ServiceError::DecryptionFailure`] → 65
/// - [`ServiceError::InvalidKey`] → 65
/// - [`ServiceError::KeyUnavailable`] → 66
/// - [`ServiceError::EncryptionFailure`] → 70
/// - [`ServiceError::Internal`] → 70
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The encrypted payload could not be parsed (wrong field count, bad base64).
    #[error("could not parse encrypted payload: {0}")]
    MalformedPayload(String),

    /// The wrapped shared key could not be recovered with the supplied private key.
    #[error("decryption failure: {0}")]
    DecryptionFailure(String),

    /// Sealing a payload failed in the crypto layer or the random source.
    #[error("encryption failure: {0}")]
    EncryptionFailure(String),

    /// Supplied key material could not be parsed as an RSA key.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Key material required for the operation was not supplied.
    #[error("key unavailable: {0}")]
    KeyUnavailable(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the process exit code (sysexits-style) for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceError::MalformedPayload(_) => 65,
            ServiceError::DecryptionFailure(_) => 65,
            ServiceError::InvalidKey(_) => 65,
            ServiceError::KeyUnavailable(_) => 66,
            ServiceError::EncryptionFailure(_) => 70,
            ServiceError::Internal(_) => 70,
        }
    }

    /// A short message that is safe to show to an end user.
    ///
    /// Never includes the detail string, which may name internal state.
    pub fn user_message(&self) -> &'static str {
        match self {
            ServiceError::MalformedPayload(_) => "could not parse encrypted payload",
            ServiceError::DecryptionFailure(_) => {
                "could not decrypt payload with the supplied private key"
            }
            ServiceError::EncryptionFailure(_) => "could not encrypt payload",
            ServiceError::InvalidKey(_) => "supplied key could not be parsed",
            ServiceError::KeyUnavailable(_) => "required key is not available",
            ServiceError::Internal(_) => "internal error",
        }
    }
}
