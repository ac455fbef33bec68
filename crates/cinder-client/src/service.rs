//! Storage service contract.
//!
//! The narrow interface the core requires from a storage backend. The
//! server never sees a decryption key through any of these methods, only
//! the opaque blob and its lifetime metadata.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cinder_core::{Message, MessageId};
use thiserror::Error;

/// Errors at the storage service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Create collided with an existing identifier.
    #[error("identifier already exists")]
    DuplicateId,

    /// Blob exceeded the service's size limit.
    #[error("payload exceeds {max_bytes} bytes")]
    PayloadTooLarge {
        /// The limit that was exceeded.
        max_bytes: usize,
    },

    /// The service answered with an error frame.
    #[error("service rejected request: {0}")]
    Rejected(String),

    /// Network-level failure before a well-formed response arrived.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ServiceError {
    /// Returns true if retrying the same operation may succeed.
    ///
    /// Only transport failures are transient. A duplicate identifier or an
    /// oversized payload fails identically on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Async contract for the message store.
///
/// Implementations: [`crate::TcpStorageClient`] for the wire protocol,
/// [`crate::InMemoryService`] for tests and local simulation.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Store a new message.
    ///
    /// # Errors
    ///
    /// `ServiceError::DuplicateId` if the identifier is already taken; the
    /// service stores at most one ciphertext per identifier, ever.
    async fn create(&self, message: Message) -> Result<(), ServiceError>;

    /// Fetch a message by identifier.
    ///
    /// `None` means unknown, expired, or already deleted - the three causes
    /// are indistinguishable by design.
    async fn read(&self, uid: &MessageId) -> Result<Option<Message>, ServiceError>;

    /// Delete a message by identifier.
    ///
    /// Returns whether a record was actually removed. Deleting an absent
    /// identifier is success, not an error - the call is idempotent.
    async fn delete(&self, uid: &MessageId) -> Result<bool, ServiceError>;

    /// Liveness probe; returns the service's UTC clock.
    async fn health(&self) -> Result<DateTime<Utc>, ServiceError>;
}
