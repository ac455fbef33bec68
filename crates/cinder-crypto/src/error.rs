//! Error type for seal/open operations.

use thiserror::Error;

/// Errors produced by the encryption engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The blob could not be decrypted.
    ///
    /// Covers every failure on the open path: wrong key, failed
    /// authentication tag, a blob too short to contain a nonce, and invalid
    /// transport encoding. Collapsing them is intentional - callers (and
    /// attackers watching callers) learn nothing about which check failed.
    #[error("decryption failed")]
    DecryptionFailed,
}
