//! In-memory store implementation.
//!
//! The fallback when no database path is usable, and the store of choice
//! for tests. Records do not survive a restart.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};

use super::{Store, StoreError, StoredMessage};

/// A `HashMap`-backed store behind `Arc<Mutex<_>>`.
///
/// Clones share the same map. Uses `lock().expect()`, which panics if the
/// mutex is poisoned - acceptable for an ephemeral store whose loss is
/// already tolerated.
#[derive(Clone)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, StoredMessage>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { records: Arc::new(Mutex::new(HashMap::new())) }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn insert(&self, message: &StoredMessage) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("Mutex poisoned");

        if records.contains_key(&message.uid) {
            return Err(StoreError::Duplicate { uid: message.uid.clone() });
        }
        records.insert(message.uid.clone(), message.clone());
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn get(&self, uid: &str) -> Result<Option<StoredMessage>, StoreError> {
        Ok(self.records.lock().expect("Mutex poisoned").get(uid).cloned())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn remove(&self, uid: &str) -> Result<bool, StoreError> {
        Ok(self.records.lock().expect("Mutex poisoned").remove(uid).is_some())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut records = self.records.lock().expect("Mutex poisoned");
        let before = records.len();
        records.retain(|_, message| message.expires_at > now);
        Ok(before - records.len())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn message_count(&self) -> Result<usize, StoreError> {
        Ok(self.records.lock().expect("Mutex poisoned").len())
    }
}
