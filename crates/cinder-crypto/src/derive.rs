//! Symmetric key derivation.
//!
//! The share URL fragment is an arbitrary token string, not key-sized
//! material. A single SHA-256 pass turns it into the 256-bit cipher key;
//! there is no salt or expansion phase because the fragment itself is
//! full-entropy output of the identifier generator.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the derived symmetric key in bytes.
pub const KEY_SIZE: usize = 32;

/// A 256-bit cipher key derived from the fragment string.
///
/// Wiped on drop. No `Debug` impl - derived key material must never reach
/// logs or error messages.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    /// Raw key bytes for cipher construction.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// Derive the cipher key from the URL-fragment key string.
pub fn derive_key(key: &str) -> DerivedKey {
    DerivedKey(Sha256::digest(key.as_bytes()).into())
}
