//! PEM parsing of the RSA public and private keys.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use thiserror::Error;

/// Errors produced while parsing key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Not an SPKI or PKCS#1 RSA public key.
    #[error("invalid RSA public key PEM")]
    InvalidPublicKey,

    /// Not a PKCS#8 or PKCS#1 RSA private key.
    #[error("invalid RSA private key PEM")]
    InvalidPrivateKey,

    /// The base64 layer around a stored public key could not be removed.
    #[error("public key is not base64-wrapped PEM text")]
    InvalidBase64Wrapping,
}

/// A recipient organization's RSA public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKeyPem {
    key: RsaPublicKey,
}

impl PublicKeyPem {
    /// Parse an SPKI (`BEGIN PUBLIC KEY`) or PKCS#1 (`BEGIN RSA PUBLIC KEY`) PEM.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidPublicKey`] if neither form parses.
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        let pem = pem.trim();
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map(|key| Self { key })
            .map_err(|_| KeyError::InvalidPublicKey)
    }

    /// Parse a PEM that has been wrapped in one more layer of standard base64.
    ///
    /// The coordinating server stores organization public keys this way.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidBase64Wrapping`] if the outer layer is not
    /// base64 of UTF-8 text, or [`KeyError::InvalidPublicKey`] if the PEM inside
    /// does not parse.
    pub fn from_base64_pem(encoded: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| KeyError::InvalidBase64Wrapping)?;
        let text = std::str::from_utf8(&bytes).map_err(|_| KeyError::InvalidBase64Wrapping)?;
        Self::from_pem(text)
    }

    /// Modulus size in bits.
    pub fn size_bits(&self) -> usize {
        self.key.size() * 8
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.key
    }
}

impl From<RsaPublicKey> for PublicKeyPem {
    fn from(key: RsaPublicKey) -> Self {
        Self { key }
    }
}

/// The caller's RSA private key.
///
/// The underlying [`RsaPrivateKey`] zeroes its components on drop.
#[derive(Clone)]
pub struct PrivateKeyPem {
    key: RsaPrivateKey,
}

impl PrivateKeyPem {
    /// Parse a PKCS#8 (`BEGIN PRIVATE KEY`) or PKCS#1 (`BEGIN RSA PRIVATE KEY`) PEM.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidPrivateKey`] if neither form parses.
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        let pem = pem.trim();
        RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map(|key| Self { key })
            .map_err(|_| KeyError::InvalidPrivateKey)
    }

    /// The public half of this key pair.
    pub fn public_key(&self) -> PublicKeyPem {
        PublicKeyPem::from(self.key.to_public_key())
    }

    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.key
    }
}

impl From<RsaPrivateKey> for PrivateKeyPem {
    fn from(key: RsaPrivateKey) -> Self {
        Self { key }
    }
}

impl fmt::Debug for PrivateKeyPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKeyPem([REDACTED])")
    }
}
