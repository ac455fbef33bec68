//! Authenticated encryption for cinder message blobs.
//!
//! All functions are pure - random bytes must be provided by the caller.
//! This enables deterministic testing; production callers draw the nonce
//! from their environment's secure source for every seal.
//!
//! Nothing in this crate logs, and no type here exposes key material
//! through `Debug`. Decryption failures are a single opaque error kind:
//! wrong key, tampered ciphertext, and truncated blobs are deliberately
//! indistinguishable so the API cannot be used as a key-guessing oracle.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod blob;
mod derive;
mod error;
mod seal;

pub use blob::TransportBlob;
pub use derive::{DerivedKey, KEY_SIZE, derive_key};
pub use error::CryptoError;
pub use seal::{NONCE_SIZE, SealedBlob, TAG_SIZE, open, seal};
