//! Wire protocol between client and storage service.
//!
//! Newline-delimited JSON frames: one request line in, one response line
//! out. Field names match the storage API records in [`crate::message`].
//! The decryption key has no representation here at all; a conformant
//! client appends it to the share URL fragment only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ident::MessageId, message::Message};

/// Upper bound on the base64 blob accepted by the service.
///
/// Sized for a 1 MiB plaintext after envelope framing and base64 expansion.
pub const MAX_ENCRYPTED_DATA_BYTES: usize = 2 * 1024 * 1024;

/// A request frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    /// Store a new message. The service rejects duplicate identifiers.
    Create(Message),
    /// Fetch a message by identifier.
    Read {
        /// Identifier to look up.
        uid: MessageId,
    },
    /// Delete a message by identifier. Idempotent from the caller's view.
    Delete {
        /// Identifier to delete.
        uid: MessageId,
    },
    /// Liveness probe.
    Health,
}

/// A response frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Response {
    /// Message stored.
    Created,
    /// Message found; expired and deleted records never reach this arm.
    Found(Message),
    /// Message removed.
    Deleted,
    /// Unknown, expired, or already-deleted identifier. The three causes
    /// are deliberately indistinguishable.
    NotFound,
    /// Create collided with an existing identifier.
    DuplicateId,
    /// Blob exceeds [`MAX_ENCRYPTED_DATA_BYTES`].
    PayloadTooLarge {
        /// The limit that was exceeded.
        #[serde(rename = "maxBytes")]
        max_bytes: usize,
    },
    /// Liveness probe answer.
    Healthy {
        /// Server wall-clock time in UTC.
        timestamp: DateTime<Utc>,
    },
    /// Request could not be processed.
    Error {
        /// Human-readable reason. Never echoes blob contents.
        message: String,
    },
}
