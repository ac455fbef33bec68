//! Transport encoding for sealed blobs.
//!
//! Wire form is base64 of `nonce || ciphertext‖tag`. Decoding rejects
//! anything shorter than the nonce; past that point authenticity is the
//! tag's job, not the framing's.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{
    error::CryptoError,
    seal::{NONCE_SIZE, SealedBlob},
};

/// Base64 transport form of a sealed blob.
pub struct TransportBlob;

impl TransportBlob {
    /// Encode a sealed blob for transport.
    pub fn encode(blob: &SealedBlob) -> String {
        let mut bytes = Vec::with_capacity(NONCE_SIZE + blob.ciphertext.len());
        bytes.extend_from_slice(&blob.nonce);
        bytes.extend_from_slice(&blob.ciphertext);
        STANDARD.encode(bytes)
    }

    /// Decode a transport string back into a sealed blob.
    ///
    /// # Errors
    ///
    /// [`CryptoError::DecryptionFailed`] for invalid base64 or a decoded
    /// blob shorter than the nonce.
    pub fn decode(encoded: &str) -> Result<SealedBlob, CryptoError> {
        let bytes = STANDARD.decode(encoded).map_err(|_| CryptoError::DecryptionFailed)?;

        if bytes.len() < NONCE_SIZE {
            return Err(CryptoError::DecryptionFailed);
        }

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[..NONCE_SIZE]);

        Ok(SealedBlob { nonce, ciphertext: bytes[NONCE_SIZE..].to_vec() })
    }
}
