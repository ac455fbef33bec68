//! Redb-backed durable store implementation.
//!
//! Uses Redb's ACID transactions with copy-on-write for crash safety. All
//! records survive server restarts; the expiry sweep is the only thing
//! that removes them besides explicit deletes.

use std::{fmt::Display, path::Path, sync::Arc};

use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};

use super::{Store, StoreError, StoredMessage};

/// Table: messages
/// Key: uid string
/// Value: JSON-encoded `StoredMessage`
const MESSAGES: TableDefinition<&str, &[u8]> = TableDefinition::new("messages");

fn io_err(err: impl Display) -> StoreError {
    StoreError::Io(err.to_string())
}

/// Durable store backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a Redb database at the given path.
    ///
    /// # Errors
    ///
    /// `StoreError::Io` if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref()).map_err(io_err)?;

        let txn = db.begin_write().map_err(io_err)?;
        {
            let _ = txn.open_table(MESSAGES).map_err(io_err)?;
        }
        txn.commit().map_err(io_err)?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl Store for RedbStore {
    fn insert(&self, message: &StoredMessage) -> Result<(), StoreError> {
        let txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = txn.open_table(MESSAGES).map_err(io_err)?;

            if table.get(message.uid.as_str()).map_err(io_err)?.is_some() {
                // Dropping the uncommitted transaction aborts it
                return Err(StoreError::Duplicate { uid: message.uid.clone() });
            }

            let bytes = serde_json::to_vec(message)?;
            table.insert(message.uid.as_str(), bytes.as_slice()).map_err(io_err)?;
        }
        txn.commit().map_err(io_err)?;
        Ok(())
    }

    fn get(&self, uid: &str) -> Result<Option<StoredMessage>, StoreError> {
        let txn = self.db.begin_read().map_err(io_err)?;
        let table = txn.open_table(MESSAGES).map_err(io_err)?;

        match table.get(uid).map_err(io_err)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn remove(&self, uid: &str) -> Result<bool, StoreError> {
        let existed;
        let txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = txn.open_table(MESSAGES).map_err(io_err)?;
            existed = table.remove(uid).map_err(io_err)?.is_some();
        }
        txn.commit().map_err(io_err)?;
        Ok(existed)
    }

    fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let removed;
        let txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = txn.open_table(MESSAGES).map_err(io_err)?;

            let mut expired = Vec::new();
            for entry in table.iter().map_err(io_err)? {
                let (key, value) = entry.map_err(io_err)?;
                let message: StoredMessage = serde_json::from_slice(value.value())?;
                if message.expires_at <= now {
                    expired.push(key.value().to_owned());
                }
            }

            removed = expired.len();
            for uid in &expired {
                table.remove(uid.as_str()).map_err(io_err)?;
            }
        }
        txn.commit().map_err(io_err)?;
        Ok(removed)
    }

    fn message_count(&self) -> Result<usize, StoreError> {
        let txn = self.db.begin_read().map_err(io_err)?;
        let table = txn.open_table(MESSAGES).map_err(io_err)?;
        Ok(table.len().map_err(io_err)? as usize)
    }
}
