//! Share-URL scheme.
//!
//! `origin + "/txt/" + id + "#" + key`. The fragment is a client-only
//! addressing convention: browsers and conformant clients never transmit
//! it, so the server cannot learn the key from the URL it serves.

use cinder_core::{KeyString, MessageId};
use thiserror::Error;

/// Path prefix identifying viewer URLs.
pub const VIEW_PATH_PREFIX: &str = "/txt/";

/// Errors parsing a viewer navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The path does not address a message.
    #[error("not a message URL")]
    NotAViewUrl,

    /// The path token is not a well-formed identifier.
    #[error("invalid message identifier")]
    InvalidIdentifier,
}

/// A parsed viewer navigation target.
///
/// `key` is `None` when the fragment is absent or empty; deciding what that
/// means (a terminal missing-key error, no network call) is the lifecycle
/// machine's job, not the parser's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTarget {
    /// Message identifier from the URL path.
    pub uid: MessageId,
    /// Decryption key from the fragment, if present.
    pub key: Option<KeyString>,
}

/// Build the shareable URL for a stored message.
pub fn share_url(origin: &str, uid: &MessageId, key: &KeyString) -> String {
    format!("{}{VIEW_PATH_PREFIX}{uid}#{}", origin.trim_end_matches('/'), key.as_str())
}

/// Parse a viewer navigation from its path and optional fragment.
///
/// # Errors
///
/// `UrlError::NotAViewUrl` if the path is not under `/txt/`;
/// `UrlError::InvalidIdentifier` if the path token is malformed.
pub fn parse_view_url(path: &str, fragment: Option<&str>) -> Result<ViewTarget, UrlError> {
    let token = path.strip_prefix(VIEW_PATH_PREFIX).ok_or(UrlError::NotAViewUrl)?;
    let uid = MessageId::parse(token).ok_or(UrlError::InvalidIdentifier)?;
    let key = fragment.and_then(KeyString::parse);
    Ok(ViewTarget { uid, key })
}

/// Parse a full share URL back into a navigation target.
///
/// Accepts any origin; only the `/txt/<id>#<key>` tail matters.
///
/// # Errors
///
/// Same as [`parse_view_url`].
pub fn parse_share_url(url: &str) -> Result<ViewTarget, UrlError> {
    let start = url.find(VIEW_PATH_PREFIX).ok_or(UrlError::NotAViewUrl)?;
    let tail = &url[start..];
    match tail.split_once('#') {
        Some((path, fragment)) => parse_view_url(path, Some(fragment)),
        None => parse_view_url(tail, None),
    }
}
