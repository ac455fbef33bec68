//! End-to-end pipeline tests against the in-memory service.

use chrono::TimeDelta;
use cinder_client::{
    ClientError, CreateRequest, InMemoryService, StorageService, create_message, decrypt_record,
    fetch_message, parse_share_url,
};
use cinder_core::{
    ContentType, DEFAULT_TITLE, Environment, FixedEnv, KeyString, LifetimeTier, MessageId,
};
use cinder_crypto::TransportBlob;

const ORIGIN: &str = "https://cinder.example";

fn request(content: &str) -> CreateRequest {
    CreateRequest {
        content: content.into(),
        title: String::new(),
        tier: LifetimeTier::Day,
        burn_after_reading: false,
    }
}

#[tokio::test]
async fn create_then_fetch_round_trip() {
    let env = FixedEnv::new(1);
    let service = InMemoryService::new(env.clone());

    let created =
        create_message(&service, &env, ORIGIN, request("{\"a\":1}")).await.unwrap();
    let fetched = fetch_message(&service, &created.uid, &created.key).await.unwrap();

    assert_eq!(fetched.envelope.content, "{\"a\":1}");
    assert_eq!(fetched.envelope.metadata.title, DEFAULT_TITLE);
    assert_eq!(fetched.envelope.metadata.data_type, ContentType::Json);
    assert!(!fetched.burn_after_reading);
    assert!(!fetched.metadata_conflict);
}

#[tokio::test]
async fn explicit_title_is_preserved() {
    let env = FixedEnv::new(2);
    let service = InMemoryService::new(env.clone());

    let mut req = request("plain body");
    req.title = "release notes".into();
    let created = create_message(&service, &env, ORIGIN, req).await.unwrap();
    let fetched = fetch_message(&service, &created.uid, &created.key).await.unwrap();

    assert_eq!(fetched.envelope.metadata.title, "release notes");
    assert_eq!(fetched.envelope.metadata.data_type, ContentType::Text);
}

#[tokio::test]
async fn share_url_round_trips_back_to_the_message() {
    let env = FixedEnv::new(3);
    let service = InMemoryService::new(env.clone());

    let created = create_message(&service, &env, ORIGIN, request("# Title\n\nbody"))
        .await
        .unwrap();
    let target = parse_share_url(&created.share_url).unwrap();
    let key = target.key.unwrap();

    let fetched = fetch_message(&service, &target.uid, &key).await.unwrap();
    assert_eq!(fetched.envelope.content, "# Title\n\nbody");
    assert_eq!(fetched.envelope.metadata.data_type, ContentType::Markdown);
}

#[tokio::test]
async fn wrong_key_is_a_terminal_decryption_failure() {
    let env = FixedEnv::new(4);
    let service = InMemoryService::new(env.clone());

    let created = create_message(&service, &env, ORIGIN, request("secret")).await.unwrap();
    let wrong = KeyString::parse("definitely-not-the-key").unwrap();

    let error = fetch_message(&service, &created.uid, &wrong).await.unwrap_err();
    assert_eq!(error, ClientError::DecryptionFailed);
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn unknown_identifier_is_not_found() {
    let env = FixedEnv::new(5);
    let service = InMemoryService::new(env.clone());
    let uid = MessageId::parse("never1ssued").unwrap();
    let key = KeyString::parse("anykey").unwrap();

    assert_eq!(fetch_message(&service, &uid, &key).await.unwrap_err(), ClientError::NotFound);
}

#[tokio::test]
async fn expired_message_becomes_not_found() {
    let env = FixedEnv::new(6);
    let service = InMemoryService::new(env.clone());

    let created = create_message(&service, &env, ORIGIN, request("short-lived")).await.unwrap();
    env.advance(TimeDelta::days(2));

    let error = fetch_message(&service, &created.uid, &created.key).await.unwrap_err();
    assert_eq!(error, ClientError::NotFound);
    // The sweep dropped the record, not just hid it
    assert_eq!(service.record_count(), 0);
}

#[tokio::test]
async fn tampered_blob_fails_decryption() {
    let env = FixedEnv::new(7);
    let service = InMemoryService::new(env.clone());

    let created = create_message(&service, &env, ORIGIN, request("integrity")).await.unwrap();
    let mut record = service.read(&created.uid).await.unwrap().unwrap();

    // Flip one character deep in the base64 body
    let mut bytes = record.encrypted_data.into_bytes();
    let mid = bytes.len() / 2;
    bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
    record.encrypted_data = String::from_utf8(bytes).unwrap();

    assert_eq!(decrypt_record(&record, &created.key).unwrap_err(), ClientError::DecryptionFailed);
}

#[tokio::test]
async fn empty_input_never_reaches_the_service() {
    let env = FixedEnv::new(8);
    let service = InMemoryService::new(env.clone());

    let error =
        create_message(&service, &env, ORIGIN, request("   \n\t ")).await.unwrap_err();
    assert_eq!(error, ClientError::EmptyInput);
    assert_eq!(service.record_count(), 0);
}

#[tokio::test]
async fn burn_flag_round_trips_without_conflict() {
    let env = FixedEnv::new(9);
    let service = InMemoryService::new(env.clone());

    let mut req = request("burn me");
    req.burn_after_reading = true;
    let created = create_message(&service, &env, ORIGIN, req).await.unwrap();
    let fetched = fetch_message(&service, &created.uid, &created.key).await.unwrap();

    assert!(fetched.burn_after_reading);
    assert!(fetched.envelope.metadata.burn_after_reading);
    assert!(!fetched.metadata_conflict);
}

#[tokio::test]
async fn server_side_burn_flag_mismatch_is_flagged() {
    let env = FixedEnv::new(10);
    let service = InMemoryService::new(env.clone());

    let created = create_message(&service, &env, ORIGIN, request("plain")).await.unwrap();
    let mut record = service.read(&created.uid).await.unwrap().unwrap();

    // A lying (or buggy) server flips its stored flag
    record.burn_after_reading = true;

    let fetched = decrypt_record(&record, &created.key).unwrap();
    assert!(fetched.metadata_conflict);
    // The server copy still drives behavior
    assert!(fetched.burn_after_reading);
}

#[tokio::test]
async fn identifier_and_key_lengths_scale_with_tier() {
    let env = FixedEnv::new(11);
    let service = InMemoryService::new(env.clone());

    for tier in LifetimeTier::ALL {
        let mut req = request("tier check");
        req.tier = tier;
        let created = create_message(&service, &env, ORIGIN, req).await.unwrap();
        assert_eq!(created.uid.as_str().len(), tier.identifier_len());
        assert_eq!(created.key.as_str().len(), tier.key_len());
    }
}

#[tokio::test]
async fn expiry_stamp_matches_tier_offset() {
    let env = FixedEnv::new(12);
    let service = InMemoryService::new(env.clone());

    let created = create_message(&service, &env, ORIGIN, request("dated")).await.unwrap();
    assert_eq!(created.expires_at, env.now_utc() + TimeDelta::days(1));

    let record = service.read(&created.uid).await.unwrap().unwrap();
    assert_eq!(record.expires_at, created.expires_at);
}

#[tokio::test]
async fn repeated_seals_never_reuse_a_nonce() {
    let env = FixedEnv::new(13);
    let service = InMemoryService::new(env.clone());

    let mut nonces = std::collections::HashSet::new();
    for _ in 0..64 {
        let created =
            create_message(&service, &env, ORIGIN, request("same plaintext")).await.unwrap();
        let record = service.read(&created.uid).await.unwrap().unwrap();
        let sealed = TransportBlob::decode(&record.encrypted_data).unwrap();
        assert!(nonces.insert(sealed.nonce), "nonce reused across seals");
    }
}

#[tokio::test]
async fn duplicate_identifier_is_rejected_by_the_service() {
    let env = FixedEnv::new(14);
    let service = InMemoryService::new(env.clone());

    let created = create_message(&service, &env, ORIGIN, request("first")).await.unwrap();
    let record = service.read(&created.uid).await.unwrap().unwrap();

    let error = service.create(record).await.unwrap_err();
    assert_eq!(error, cinder_client::ServiceError::DuplicateId);
}

#[tokio::test]
async fn oversized_payload_is_rejected() {
    let env = FixedEnv::new(15);
    let service = InMemoryService::new(env.clone());

    let big = "x".repeat(2 * 1024 * 1024);
    let error = create_message(&service, &env, ORIGIN, request(&big)).await.unwrap_err();
    assert!(matches!(error, ClientError::Transport(_)));
}
