//! Storage abstraction for message records.
//!
//! Trait-based abstraction over the blob store. The trait is synchronous;
//! both implementations complete in-memory or on the local disk fast enough
//! that the connection tasks call them directly between await points.

mod error;
mod memory;
mod redb;

use chrono::{DateTime, Utc};
pub use error::StoreError;
pub use memory::MemoryStore;
use serde::{Deserialize, Serialize};

pub use self::redb::RedbStore;

/// A stored message record.
///
/// Field names are the storage schema; `created_at` is recorded for
/// operational forensics and never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Client-chosen identifier.
    pub uid: String,
    /// Opaque base64 ciphertext blob.
    pub encrypted_data: String,
    /// Absolute expiry in UTC.
    pub expires_at: DateTime<Utc>,
    /// Burn-after-reading flag, echoed to viewers.
    pub burn_after_reading: bool,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction for message records.
///
/// Must be Clone (shared across connection tasks), Send + Sync, and
/// synchronous. Implementations share internal state via Arc, so clones
/// access the same underlying store.
pub trait Store: Clone + Send + Sync + 'static {
    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// `StoreError::Duplicate` if the identifier already exists - at most
    /// one ciphertext is ever stored per identifier.
    fn insert(&self, message: &StoredMessage) -> Result<(), StoreError>;

    /// Fetch a record by identifier. `None` if absent.
    ///
    /// Expiry is the caller's concern; this returns whatever is stored.
    fn get(&self, uid: &str) -> Result<Option<StoredMessage>, StoreError>;

    /// Remove a record. Returns whether one existed.
    fn remove(&self, uid: &str) -> Result<bool, StoreError>;

    /// Delete every record with `expires_at <= now`. Returns how many.
    fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError>;

    /// Number of stored records.
    fn message_count(&self) -> Result<usize, StoreError>;
}
