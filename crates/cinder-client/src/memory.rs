//! In-process storage service for tests and local simulation.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cinder_core::{Environment, Message, MessageId, wire::MAX_ENCRYPTED_DATA_BYTES};

use crate::service::{ServiceError, StorageService};

/// A [`StorageService`] backed by a `HashMap`.
///
/// Mirrors the real service's behavior: duplicate rejection, the blob size
/// cap, and expiry enforcement on the read path (an expired record is
/// dropped and reported as absent, indistinguishable from never-existed).
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct InMemoryService<E: Environment> {
    env: E,
    records: Arc<Mutex<HashMap<String, Message>>>,
}

impl<E: Environment> InMemoryService<E> {
    /// Create an empty service reading time from `env`.
    pub fn new(env: E) -> Self {
        Self { env, records: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// Number of live records. Useful in tests.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned (a thread panicked while
    /// holding the lock). Acceptable for test/simulation code.
    #[allow(clippy::expect_used)]
    pub fn record_count(&self) -> usize {
        self.records.lock().expect("Mutex poisoned").len()
    }
}

#[async_trait]
impl<E: Environment> StorageService for InMemoryService<E> {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    async fn create(&self, message: Message) -> Result<(), ServiceError> {
        if message.encrypted_data.len() > MAX_ENCRYPTED_DATA_BYTES {
            return Err(ServiceError::PayloadTooLarge { max_bytes: MAX_ENCRYPTED_DATA_BYTES });
        }

        let mut records = self.records.lock().expect("Mutex poisoned");
        if records.contains_key(message.uid.as_str()) {
            return Err(ServiceError::DuplicateId);
        }
        records.insert(message.uid.as_str().to_owned(), message);
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    async fn read(&self, uid: &MessageId) -> Result<Option<Message>, ServiceError> {
        let now = self.env.now_utc();
        let mut records = self.records.lock().expect("Mutex poisoned");

        match records.get(uid.as_str()) {
            Some(record) if record.expires_at <= now => {
                // Expired records are swept on the read path, like the
                // real service
                records.remove(uid.as_str());
                Ok(None)
            },
            Some(record) => Ok(Some(record.clone())),
            None => Ok(None),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    async fn delete(&self, uid: &MessageId) -> Result<bool, ServiceError> {
        Ok(self.records.lock().expect("Mutex poisoned").remove(uid.as_str()).is_some())
    }

    async fn health(&self) -> Result<DateTime<Utc>, ServiceError> {
        Ok(self.env.now_utc())
    }
}
