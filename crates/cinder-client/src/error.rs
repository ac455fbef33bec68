//! Client-side error taxonomy.

use cinder_core::EnvelopeError;
use cinder_crypto::CryptoError;
use thiserror::Error;

use crate::service::ServiceError;

/// Everything that can go wrong in a creator or viewer session.
///
/// Messages are written for end users and deliberately do not reveal which
/// sub-check failed: a wrong key and a tampered blob read identically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Submit was attempted with nothing to encrypt.
    #[error("there is no message to encrypt")]
    EmptyInput,

    /// The viewer URL has no fragment, so no decryption can be attempted.
    #[error("this link is incomplete: it is missing its decryption key")]
    MissingKey,

    /// Unknown, expired, or deleted message - merged by design.
    #[error("this message does not exist, has expired, or was deleted")]
    NotFound,

    /// The blob could not be decrypted with the provided key.
    #[error("this link cannot decrypt the message")]
    DecryptionFailed,

    /// Decryption succeeded but the plaintext is not a valid envelope.
    #[error("the message is damaged and cannot be displayed")]
    MalformedEnvelope,

    /// The storage service could not be reached or answered abnormally.
    #[error("the storage service is unavailable: {0}")]
    Transport(String),
}

impl ClientError {
    /// Returns true if the caller may retry the failed operation.
    ///
    /// Only transport failures qualify. A failed decryption retried with
    /// the same ciphertext and key fails identically, so it is terminal.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<CryptoError> for ClientError {
    fn from(_: CryptoError) -> Self {
        Self::DecryptionFailed
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(_: EnvelopeError) -> Self {
        Self::MalformedEnvelope
    }
}

impl From<ServiceError> for ClientError {
    fn from(err: ServiceError) -> Self {
        Self::Transport(err.to_string())
    }
}
