//! End-to-end encryption envelope for federated task inputs and results.
//!
//! A task input (or result) travels from the coordinating party to a
//! data-holding organization as a three-field envelope:
//!
//! ```text
//! base64(RSA-PKCS1v15(base64(shared_key))) $ base64(iv) $ base64(AES-256-CTR(payload))
//! ```
//!
//! - [`codec`]: `encrypt` / `decrypt` / `open` over the wire string.
//! - [`envelope`]: parsing and formatting of the three fields.
//! - [`crypto`]: the AES-CTR, RSA key-wrap and randomness primitives.
//! - [`keys`]: PEM key parsing, the ephemeral shared key and the session
//!   private key store.
//! - [`collaboration`]: the per-collaboration encryption switch and
//!   per-organization fan-out.
//!
//! The format carries no authentication tag. Decrypting with the wrong shared
//! key yields wrong bytes rather than an error; callers needing authenticity
//! must add their own integrity check on top.

pub mod codec;
pub mod collaboration;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod keys;

pub use codec::{decrypt, encrypt, encrypt_with, open, Opened};
pub use collaboration::{EncryptionMode, PublicKeySource};
pub use envelope::{Envelope, EnvelopeFraming, Framing};
pub use error::{EnvelopeError, FormatError};
pub use keys::{PrivateKeyPem, PrivateKeyStore, PublicKeyPem, SharedKey};
