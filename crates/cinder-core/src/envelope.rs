//! Plaintext envelope codec.
//!
//! The envelope bundles the message body with its display metadata before
//! encryption, so the server never sees either. Encoding is canonical JSON
//! with fixed field names; decode is the exact inverse of encode for every
//! valid envelope.
//!
//! The `burn_after_reading` flag is denormalized: it lives here (inside the
//! ciphertext) and on the server-visible record. The server-side copy drives
//! the viewing lifecycle; a disagreement marks the metadata as untrusted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content_type::ContentType;

/// Title used when the sender leaves the field empty.
pub const DEFAULT_TITLE: &str = "Encrypted Message";

/// The plaintext record encrypted as a single unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Message body.
    pub content: String,
    /// Display metadata.
    pub metadata: EnvelopeMetadata,
}

/// Display metadata carried inside the ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMetadata {
    /// Message title, never empty (defaults to [`DEFAULT_TITLE`]).
    pub title: String,
    /// Content type detected once at creation time.
    #[serde(rename = "dataType")]
    pub data_type: ContentType,
    /// Sender-requested burn-after-reading flag.
    #[serde(rename = "burnAfterReading")]
    pub burn_after_reading: bool,
}

/// Structurally invalid envelope bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Not a decodable envelope record (bad JSON or missing fields).
    #[error("malformed envelope")]
    Malformed,
}

impl Envelope {
    /// Build an envelope, substituting the default title when empty.
    pub fn new(
        content: String,
        title: &str,
        data_type: ContentType,
        burn_after_reading: bool,
    ) -> Self {
        let title =
            if title.trim().is_empty() { DEFAULT_TITLE.to_owned() } else { title.to_owned() };
        Self { content, metadata: EnvelopeMetadata { title, data_type, burn_after_reading } }
    }

    /// Serialize to the plaintext bytes handed to the encryption engine.
    pub fn encode(&self) -> Vec<u8> {
        let Ok(bytes) = serde_json::to_vec(self) else {
            unreachable!("envelope serialization cannot fail: plain strings and bools");
        };
        bytes
    }

    /// Parse decrypted plaintext bytes back into an envelope.
    ///
    /// # Errors
    ///
    /// `EnvelopeError::Malformed` if the bytes are not a well-formed envelope
    /// record.
    pub fn decode(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        serde_json::from_slice(bytes).map_err(|_| EnvelopeError::Malformed)
    }
}
