//! Session side-effects.
//!
//! Actions are instructions the [`crate::App`] state machine hands to the
//! runtime. The machine itself never performs I/O; it only decides.

use cinder_client::CreateRequest;
use cinder_core::{KeyString, Message, MessageId};

/// Actions produced by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Run the creation pipeline and store the result.
    Submit {
        /// Content and options to encrypt.
        request: CreateRequest,
    },

    /// Fetch the ciphertext record for a message.
    FetchCiphertext {
        /// Identifier from the viewer URL path.
        uid: MessageId,
    },

    /// Decrypt a fetched record. CPU-bound, runs between suspension points.
    Decrypt {
        /// The fetched record.
        record: Message,
        /// Key from the URL fragment.
        key: KeyString,
    },

    /// Issue the (idempotent) delete call.
    Delete {
        /// Identifier to delete.
        uid: MessageId,
    },
}
