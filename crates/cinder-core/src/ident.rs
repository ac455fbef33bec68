//! Message identifiers and decryption key strings.
//!
//! Both are random tokens over a URL-safe 64-character alphabet, sized by
//! the message's [`LifetimeTier`]: longer retention means a longer exposure
//! window, so both tokens grow with it. Uniqueness of identifiers is
//! probabilistic only; the storage service rejects duplicates on write.
//!
//! The key string is the secret that travels in the URL fragment. It is
//! never serialized into wire records, its `Debug` output is redacted, and
//! the backing string is wiped on drop.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};
use zeroize::Zeroize;

use crate::{env::Environment, tier::LifetimeTier};

/// The 64-character URL-safe token alphabet.
///
/// 64 divides 256 evenly, so masking a random byte to 6 bits indexes the
/// alphabet uniformly.
pub const URL_SAFE_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Opaque message identifier used as the URL path token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl<'de> Deserialize<'de> for MessageId {
    /// Deserialization enforces the same charset as [`MessageId::parse`], so
    /// wire frames cannot smuggle arbitrary strings into the store.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| de::Error::custom("invalid message identifier"))
    }
}

impl MessageId {
    /// Parse an identifier from an untrusted string.
    ///
    /// Returns `None` if empty or containing characters outside the token
    /// alphabet.
    pub fn parse(raw: &str) -> Option<Self> {
        (!raw.is_empty() && raw.bytes().all(is_url_safe)).then(|| Self(raw.to_owned()))
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The decryption key string carried in the URL fragment.
///
/// Deliberately not `Serialize`: wire records must never contain it.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyString(String);

impl KeyString {
    /// Parse a key from a URL fragment.
    ///
    /// Returns `None` for an empty fragment.
    pub fn parse(raw: &str) -> Option<Self> {
        (!raw.is_empty()).then(|| Self(raw.to_owned()))
    }

    /// Key material as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for KeyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material must never reach logs
        f.write_str("KeyString(..)")
    }
}

impl Drop for KeyString {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Generate a fresh identifier/key pair for the given tier.
///
/// Entropy comes from the environment, which must be cryptographically
/// secure in production.
pub fn generate<E: Environment>(tier: LifetimeTier, env: &E) -> (MessageId, KeyString) {
    (
        MessageId(random_token(env, tier.identifier_len())),
        KeyString(random_token(env, tier.key_len())),
    )
}

fn random_token<E: Environment>(env: &E, len: usize) -> String {
    let mut bytes = vec![0u8; len];
    env.random_bytes(&mut bytes);
    bytes.iter().map(|&b| char::from(URL_SAFE_ALPHABET[usize::from(b & 0x3f)])).collect()
}

fn is_url_safe(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedEnv;

    #[test]
    fn lengths_follow_tier_table() {
        let env = FixedEnv::new(1);
        for tier in LifetimeTier::ALL {
            let (id, key) = generate(tier, &env);
            assert_eq!(id.as_str().len(), tier.identifier_len());
            assert_eq!(key.as_str().len(), tier.key_len());
        }
    }

    #[test]
    fn tokens_stay_in_alphabet() {
        let env = FixedEnv::new(2);
        let (id, key) = generate(LifetimeTier::Year, &env);
        assert!(id.as_str().bytes().all(is_url_safe));
        assert!(key.as_str().bytes().all(is_url_safe));
    }

    #[test]
    fn generation_is_seed_deterministic() {
        let (id_a, key_a) = generate(LifetimeTier::Month, &FixedEnv::new(42));
        let (id_b, key_b) = generate(LifetimeTier::Month, &FixedEnv::new(42));
        assert_eq!(id_a, id_b);
        assert_eq!(key_a.as_str(), key_b.as_str());
    }

    #[test]
    fn distinct_seeds_give_distinct_tokens() {
        let (id_a, _) = generate(LifetimeTier::Day, &FixedEnv::new(1));
        let (id_b, _) = generate(LifetimeTier::Day, &FixedEnv::new(2));
        assert_ne!(id_a, id_b);
    }

    #[test]
    fn message_id_parse_rejects_bad_input() {
        assert!(MessageId::parse("").is_none());
        assert!(MessageId::parse("abc/def").is_none());
        assert!(MessageId::parse("abc def").is_none());
        assert!(MessageId::parse("AZaz09_-").is_some());
    }

    #[test]
    fn key_string_parse_rejects_empty() {
        assert!(KeyString::parse("").is_none());
        assert!(KeyString::parse("k").is_some());
    }

    #[test]
    fn key_string_debug_is_redacted() {
        let key = KeyString::parse("super-secret-key").unwrap();
        assert_eq!(format!("{key:?}"), "KeyString(..)");
    }

    #[test]
    fn message_id_serializes_transparently() {
        let id = MessageId::parse("abcd1234").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abcd1234\"");
    }

    #[test]
    fn message_id_deserialization_enforces_charset() {
        assert!(serde_json::from_str::<MessageId>("\"abcd1234\"").is_ok());
        assert!(serde_json::from_str::<MessageId>("\"../etc/passwd\"").is_err());
        assert!(serde_json::from_str::<MessageId>("\"\"").is_err());
    }
}
