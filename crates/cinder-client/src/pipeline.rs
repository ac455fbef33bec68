//! Creation and retrieval pipelines.
//!
//! Creation: detect content type once, wrap in an envelope, generate the
//! identifier/key pair for the requested tier, seal with a fresh nonce,
//! and hand the blob to the storage service. Retrieval is the inverse.
//!
//! Key material and plaintext only live in the returned values; nothing is
//! cached or logged here.

use chrono::{DateTime, Utc};
use cinder_core::{
    Envelope, Environment, KeyString, LifetimeTier, Message, MessageId, detect, generate,
};
use cinder_crypto::{NONCE_SIZE, TransportBlob, open, seal};

use crate::{error::ClientError, service::StorageService, url::share_url};

/// Input to the creation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    /// Message body to encrypt.
    pub content: String,
    /// Optional title; empty means the placeholder is used.
    pub title: String,
    /// Requested retention tier.
    pub tier: LifetimeTier,
    /// Delete after the first viewing countdown.
    pub burn_after_reading: bool,
}

/// Result of a successful creation.
#[derive(Debug, Clone)]
pub struct CreatedMessage {
    /// Identifier under which the ciphertext is stored.
    pub uid: MessageId,
    /// Decryption key; exists only here and in the share URL.
    pub key: KeyString,
    /// Full share URL including the fragment.
    pub share_url: String,
    /// Absolute expiry stamped at creation.
    pub expires_at: DateTime<Utc>,
}

/// A fetched and decrypted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedMessage {
    /// The decrypted envelope (content + display metadata).
    pub envelope: Envelope,
    /// Server-side expiry stamp.
    pub expires_at: DateTime<Utc>,
    /// Server-side burn flag. This copy drives the viewing lifecycle.
    pub burn_after_reading: bool,
    /// The envelope and the server disagree about the burn flag.
    ///
    /// A disagreement is a protocol violation; the envelope copy is then
    /// untrusted display metadata, nothing more.
    pub metadata_conflict: bool,
}

/// Encrypt and store a message, returning the share URL.
///
/// # Errors
///
/// `ClientError::EmptyInput` for blank content (nothing is generated and no
/// network call is made); `ClientError::Transport` for storage failures,
/// which the caller may retry - a retry re-runs the whole pipeline and
/// generates a fresh identifier and key.
pub async fn create_message<S: StorageService, E: Environment>(
    service: &S,
    env: &E,
    origin: &str,
    request: CreateRequest,
) -> Result<CreatedMessage, ClientError> {
    if request.content.trim().is_empty() {
        return Err(ClientError::EmptyInput);
    }

    // Detected once, stored in the envelope, never re-derived at view time
    let data_type = detect(&request.content);
    let envelope =
        Envelope::new(request.content, &request.title, data_type, request.burn_after_reading);

    let (uid, key) = generate(request.tier, env);

    // Fresh nonce per seal; reuse under one key would break the cipher
    let mut nonce = [0u8; NONCE_SIZE];
    env.random_bytes(&mut nonce);
    let sealed = seal(&envelope.encode(), key.as_str(), nonce);

    let expires_at = request.tier.expires_at(env.now_utc());
    let message = Message {
        uid: uid.clone(),
        encrypted_data: TransportBlob::encode(&sealed),
        expires_at,
        burn_after_reading: request.burn_after_reading,
    };

    service.create(message).await?;

    let share_url = share_url(origin, &uid, &key);
    Ok(CreatedMessage { uid, key, share_url, expires_at })
}

/// Fetch a stored message and decrypt it.
///
/// # Errors
///
/// `ClientError::NotFound` when the service has no record (expired, deleted,
/// or never issued - indistinguishable); `DecryptionFailed` /
/// `MalformedEnvelope` as terminal corrupted-link errors; `Transport` for
/// network failures.
pub async fn fetch_message<S: StorageService>(
    service: &S,
    uid: &MessageId,
    key: &KeyString,
) -> Result<FetchedMessage, ClientError> {
    let record = service.read(uid).await?.ok_or(ClientError::NotFound)?;
    decrypt_record(&record, key)
}

/// Decrypt and decode a fetched record.
///
/// Synchronous: runs between network suspension points.
///
/// # Errors
///
/// `DecryptionFailed` for a malformed or unopenable blob, `MalformedEnvelope`
/// when decryption succeeds but the plaintext is not an envelope.
pub fn decrypt_record(record: &Message, key: &KeyString) -> Result<FetchedMessage, ClientError> {
    let sealed = TransportBlob::decode(&record.encrypted_data)?;
    let plaintext = open(&sealed, key.as_str())?;
    let envelope = Envelope::decode(&plaintext)?;

    let metadata_conflict = envelope.metadata.burn_after_reading != record.burn_after_reading;

    Ok(FetchedMessage {
        envelope,
        expires_at: record.expires_at,
        burn_after_reading: record.burn_after_reading,
        metadata_conflict,
    })
}
