//! Task payload types exchanged with the coordinating server.
//!
//! A task input is serialised as JSON, then either sealed in an encryption
//! envelope (encrypted collaborations) or carried as base64 text (plain
//! collaborations). Results come back in the same shape.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Task input
// ---------------------------------------------------------------------------

/// The input handed to an algorithm running at a data-holding organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    /// Name of the algorithm function to invoke.
    pub method: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
    /// Keyword arguments.
    #[serde(default)]
    pub kwargs: serde_json::Map<String, serde_json::Value>,
}

impl TaskInput {
    /// Create an input for `method` with no arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Vec::new(),
            kwargs: serde_json::Map::new(),
        }
    }

    /// Serialise to the JSON bytes that get sealed per organization.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Parse the JSON bytes recovered from an opened payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

// ---------------------------------------------------------------------------
// Task creation
// ---------------------------------------------------------------------------

/// One entry of the `organizations` list in a task creation request.
///
/// `input` is either an envelope string (encrypted collaboration) or the
/// base64 text of the serialised input (plain collaboration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationInput {
    /// Recipient organization identifier.
    pub id: u64,
    /// Sealed or encoded input for this organization.
    pub input: String,
}

// ---------------------------------------------------------------------------
// Plain payload encoding
// ---------------------------------------------------------------------------

/// Encode payload bytes as the base64 text used by plain collaborations.
pub fn encode_plain(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode the base64 text of a plain collaboration payload.
pub fn decode_plain(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text)
}
