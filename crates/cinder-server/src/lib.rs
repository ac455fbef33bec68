//! Cinder storage service.
//!
//! The server side of the paste protocol: it stores opaque ciphertext blobs
//! under client-chosen identifiers, enforces expiry and duplicate rejection,
//! and answers the four wire operations (create, read, delete, health) over
//! newline-delimited JSON on TCP.
//!
//! The server never possesses a decryption key. Blobs are bytes with a
//! lifetime; nothing here can read them.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod driver;
pub mod store;
pub mod transport;

pub use driver::Driver;
pub use store::{MemoryStore, RedbStore, Store, StoreError, StoredMessage};
pub use transport::serve;
