//! Request driver.
//!
//! Pure request → response logic over a [`Store`]: validation, duplicate
//! rejection, the expiry sweep on the read path, and idempotent deletes.
//! Transport-agnostic and fully testable without a socket.

use chrono::{DateTime, Utc};
use cinder_core::{
    Environment, Message, MessageId,
    wire::{MAX_ENCRYPTED_DATA_BYTES, Request, Response},
};

use crate::store::{Store, StoreError, StoredMessage};

/// Handles wire requests against a store.
#[derive(Clone)]
pub struct Driver<S: Store, E: Environment> {
    store: S,
    env: E,
}

impl<S: Store, E: Environment> Driver<S, E> {
    /// Create a driver over the given store and environment.
    pub fn new(store: S, env: E) -> Self {
        Self { store, env }
    }

    /// Process one request.
    ///
    /// Infallible by construction: every failure mode has a response frame,
    /// and internal store errors collapse to an opaque error response after
    /// being logged server-side.
    pub fn handle(&self, request: Request) -> Response {
        match request {
            Request::Create(message) => self.handle_create(message),
            Request::Read { uid } => self.handle_read(&uid),
            Request::Delete { uid } => self.handle_delete(&uid),
            Request::Health => Response::Healthy { timestamp: self.env.now_utc() },
        }
    }

    fn handle_create(&self, message: Message) -> Response {
        if message.encrypted_data.len() > MAX_ENCRYPTED_DATA_BYTES {
            tracing::warn!(uid = %message.uid, size = message.encrypted_data.len(),
                "rejected oversized blob");
            return Response::PayloadTooLarge { max_bytes: MAX_ENCRYPTED_DATA_BYTES };
        }

        let record = StoredMessage {
            uid: message.uid.as_str().to_owned(),
            encrypted_data: message.encrypted_data,
            expires_at: message.expires_at,
            burn_after_reading: message.burn_after_reading,
            created_at: self.env.now_utc(),
        };

        match self.store.insert(&record) {
            Ok(()) => {
                tracing::info!(uid = %message.uid, expires_at = %record.expires_at,
                    burn = record.burn_after_reading, "stored message");
                Response::Created
            },
            Err(StoreError::Duplicate { .. }) => {
                tracing::warn!(uid = %message.uid, "rejected duplicate identifier");
                Response::DuplicateId
            },
            Err(err) => internal_error(&err),
        }
    }

    fn handle_read(&self, uid: &MessageId) -> Response {
        let now = self.env.now_utc();

        // Expired records are removed before any read is answered, so a
        // dead identifier is indistinguishable from one never issued
        match self.store.sweep_expired(now) {
            Ok(0) => {},
            Ok(swept) => tracing::info!(swept, "swept expired messages"),
            Err(err) => return internal_error(&err),
        }

        match self.store.get(uid.as_str()) {
            Ok(Some(record)) => match to_wire(&record, now) {
                Some(message) => {
                    tracing::info!(uid = %uid, "served message");
                    Response::Found(message)
                },
                None => Response::NotFound,
            },
            Ok(None) => Response::NotFound,
            Err(err) => internal_error(&err),
        }
    }

    fn handle_delete(&self, uid: &MessageId) -> Response {
        match self.store.remove(uid.as_str()) {
            Ok(true) => {
                tracing::info!(uid = %uid, "deleted message");
                Response::Deleted
            },
            Ok(false) => Response::NotFound,
            Err(err) => internal_error(&err),
        }
    }
}

/// Convert a stored record to its wire form.
///
/// Returns `None` for a record that expired between the sweep and the get,
/// or whose identifier fails to re-parse (corrupt store).
fn to_wire(record: &StoredMessage, now: DateTime<Utc>) -> Option<Message> {
    if record.expires_at <= now {
        return None;
    }
    let uid = MessageId::parse(&record.uid)?;
    Some(Message {
        uid,
        encrypted_data: record.encrypted_data.clone(),
        expires_at: record.expires_at,
        burn_after_reading: record.burn_after_reading,
    })
}

/// Log the real failure, answer with an opaque frame.
fn internal_error(err: &StoreError) -> Response {
    tracing::error!(error = %err, "store operation failed");
    Response::Error { message: "internal storage error".into() }
}
