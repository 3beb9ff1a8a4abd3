//! Primitives behind the envelope: AES-256-CTR, RSA PKCS#1 v1.5 key-wrap,
//! and the OS CSPRNG.
//!
//! Nothing in here knows about the wire format or base64 framing; that lives
//! in [`crate::codec`] and [`crate::envelope`].

pub mod cipher;
pub mod keywrap;
pub mod random;

pub use cipher::{IV_LEN, KEY_LEN};
