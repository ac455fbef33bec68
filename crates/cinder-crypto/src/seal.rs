//! AEAD seal and open.

use chacha20poly1305::{
    ChaCha20Poly1305, Nonce,
    aead::{Aead, KeyInit},
};

use crate::{derive::derive_key, error::CryptoError};

/// Nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// Poly1305 tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// A sealed message: fresh nonce plus ciphertext with trailing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBlob {
    /// The 12-byte nonce used for this seal.
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext including the 16-byte Poly1305 tag.
    pub ciphertext: Vec<u8>,
}

impl SealedBlob {
    /// Plaintext length (ciphertext length minus authentication tag).
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len().saturating_sub(TAG_SIZE)
    }
}

/// Encrypt plaintext under the fragment key string.
///
/// The nonce MUST be freshly random for every call with the same key;
/// reuse breaks confidentiality and authenticity. Callers draw it from a
/// cryptographically secure source in production - it is a parameter only
/// so tests can be deterministic.
pub fn seal(plaintext: &[u8], key: &str, nonce: [u8; NONCE_SIZE]) -> SealedBlob {
    let derived = derive_key(key);
    let cipher = ChaCha20Poly1305::new(derived.as_bytes().into());

    let Ok(ciphertext) = cipher.encrypt(Nonce::from_slice(&nonce), plaintext) else {
        unreachable!("ChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    SealedBlob { nonce, ciphertext }
}

/// Decrypt a sealed blob under the fragment key string.
///
/// # Errors
///
/// [`CryptoError::DecryptionFailed`] on any failure: wrong key, tampered
/// ciphertext or tag, or a ciphertext shorter than the tag. The cause is
/// never distinguished.
pub fn open(blob: &SealedBlob, key: &str) -> Result<Vec<u8>, CryptoError> {
    let derived = derive_key(key);
    let cipher = ChaCha20Poly1305::new(derived.as_bytes().into());

    cipher
        .decrypt(Nonce::from_slice(&blob.nonce), blob.ciphertext.as_slice())
        .map_err(|_| CryptoError::DecryptionFailed)
}
