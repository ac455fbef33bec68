//! Observable session state.
//!
//! [`Phase`] is the tagged state of one creator or viewer session, and
//! [`ViewedMessage`] is the view model handed to a presentation layer.
//! Together with the read-only accessors on [`crate::App`] they are the
//! entire surface a renderer needs; protocol mechanics stay inside the
//! state machine.

use chrono::{DateTime, Utc};
use cinder_core::ContentType;

/// Number of ticks a burn countdown starts from.
pub const COUNTDOWN_START: u32 = 15;

/// Phase of a session, creator or viewer.
///
/// Creator path: `Draft → Submitting → Shared`.
/// Viewer path: `Loading → Decrypting → Viewing | Countdown | NotFound |
/// DecryptFailed`, with `Countdown → Viewing` on cancel and
/// `Countdown → Deleted` at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Composing a new message.
    Draft,
    /// Waiting for the storage service to accept the write.
    Submitting,
    /// Stored. The draft is locked; re-submission is not supported.
    Shared {
        /// Full share URL including the key fragment.
        share_url: String,
    },
    /// Waiting for the ciphertext to arrive.
    Loading,
    /// Ciphertext received, decryption in progress.
    Decrypting,
    /// Steady display.
    Viewing {
        /// The decrypted message.
        message: ViewedMessage,
    },
    /// Burn countdown running; the message is still displayed.
    Countdown {
        /// The decrypted message.
        message: ViewedMessage,
        /// Ticks left before deletion.
        remaining: u32,
    },
    /// Countdown reached zero and the delete was issued.
    ///
    /// Rendered like [`Phase::NotFound`]; the record is gone.
    Deleted,
    /// Unknown, expired, or deleted message - indistinguishable by design.
    NotFound,
    /// The viewer URL carried no key fragment. Terminal, and reached
    /// without any network call.
    MissingKey,
    /// Wrong key, tampered ciphertext, or unreadable envelope. Terminal;
    /// retrying the same link can only fail the same way.
    DecryptFailed,
    /// The read request failed at the transport layer.
    LoadFailed {
        /// User-facing description.
        message: String,
    },
}

/// View model of a decrypted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewedMessage {
    /// Message title from the envelope.
    pub title: String,
    /// Decrypted body.
    pub content: String,
    /// Display type detected at creation time. Never re-derived here.
    pub data_type: ContentType,
    /// Server-side expiry stamp.
    pub expires_at: DateTime<Utc>,
    /// Server-side burn flag; this copy drove the phase decision.
    pub burn_after_reading: bool,
    /// The envelope disagreed with the server about the burn flag.
    ///
    /// Surfaced so a renderer can mark the metadata as untrusted; it never
    /// influences the lifecycle.
    pub metadata_conflict: bool,
}
