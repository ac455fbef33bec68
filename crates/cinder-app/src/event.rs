//! Session input events.
//!
//! Events are the only way the world reaches the [`crate::App`] state
//! machine: completions of the network calls it requested, decryption
//! results, and countdown ticks. They are processed strictly in arrival
//! order, which is what makes the cancel-versus-final-tick tie-break
//! deterministic.

use cinder_client::{ClientError, FetchedMessage};
use cinder_core::Message;

/// Events processed by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The storage service accepted the write.
    SubmitAccepted {
        /// Full share URL including the key fragment.
        share_url: String,
    },

    /// The create call failed before the service accepted it.
    SubmitFailed {
        /// What went wrong; retryable iff transport-level.
        error: ClientError,
    },

    /// The read call returned a ciphertext record.
    CiphertextReceived {
        /// The server-visible record.
        record: Message,
    },

    /// The read call found nothing (unknown, expired, or deleted).
    ReadNotFound,

    /// The read call failed at the transport layer.
    ReadFailed {
        /// What went wrong.
        error: ClientError,
    },

    /// Decryption and envelope decode succeeded.
    Decrypted {
        /// The decrypted message with its server metadata.
        message: FetchedMessage,
    },

    /// Decryption or envelope decode failed. Terminal for the session.
    DecryptFailed {
        /// What went wrong; never retried.
        error: ClientError,
    },

    /// The delete call completed (including the already-gone case).
    DeleteCompleted,

    /// The delete call failed at the transport layer; may be retried.
    DeleteFailed {
        /// What went wrong.
        error: ClientError,
    },

    /// One countdown time unit elapsed.
    Tick,
}
