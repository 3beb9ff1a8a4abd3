//! Key material consumed by the envelope.
//!
//! # Lifecycle
//!
//! - Public keys come from a key-retrieval collaborator, one per recipient
//!   organization, and are parsed per call.
//! - The caller's private key is uploaded by the user for the session. It is
//!   handed to each `decrypt` call explicitly or held in a caller-owned
//!   [`PrivateKeyStore`]; there is no process-wide current key.
//! - A [`SharedKey`] lives for one `encrypt` or `decrypt` call and is zeroed
//!   when dropped.
//!
//! Key material is never logged. `Debug` output of private and shared keys
//! is redacted.

pub mod pem;
pub mod shared;
pub mod store;

pub use pem::{KeyError, PrivateKeyPem, PublicKeyPem};
pub use shared::SharedKey;
pub use store::PrivateKeyStore;
