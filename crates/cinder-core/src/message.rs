//! The server-visible message record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ident::MessageId;

/// What the storage service sees: identifier, opaque ciphertext, lifetime.
///
/// The decryption key is deliberately absent. The server owns storage and
/// expiry of this record and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// URL path token identifying the record.
    pub uid: MessageId,
    /// Base64-encoded `nonce || ciphertext‖tag` blob.
    #[serde(rename = "encryptedData")]
    pub encrypted_data: String,
    /// Absolute expiry in UTC; the server returns not-found past it.
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
    /// Server-side burn flag. Drives the viewer lifecycle.
    #[serde(rename = "burnAfterReading")]
    pub burn_after_reading: bool,
}
