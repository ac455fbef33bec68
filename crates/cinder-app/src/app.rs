//! Session state machine.
//!
//! [`App`] is a pure state machine: it consumes [`crate::AppEvent`] inputs
//! and API calls, and produces [`crate::AppAction`] instructions for the
//! runtime to execute. No I/O dependencies - fully testable without a
//! network or a clock.
//!
//! One `App` models one session, creator or viewer. The decryption key is
//! held only between navigation and decryption, then dropped; it is never
//! part of any action that touches the network.

use cinder_client::{ClientError, CreateRequest, FetchedMessage, ViewTarget};
use cinder_core::{KeyString, MessageId};

use crate::{AppAction, AppEvent, COUNTDOWN_START, Phase, ViewedMessage};

/// Session state machine.
#[derive(Debug)]
pub struct App {
    /// Current phase.
    phase: Phase,
    /// Viewer target identifier.
    uid: Option<MessageId>,
    /// Decryption key, held only until decryption completes.
    key: Option<KeyString>,
    /// A countdown in this session already issued its delete call.
    delete_issued: bool,
    /// The issued delete failed at the transport layer.
    delete_failed: bool,
    /// Transient user-facing status line.
    status: Option<String>,
}

impl App {
    /// Create a session in the composing phase.
    pub fn new() -> Self {
        Self {
            phase: Phase::Draft,
            uid: None,
            key: None,
            delete_issued: false,
            delete_failed: false,
            status: None,
        }
    }

    /// Submit the draft for encryption and storage.
    ///
    /// Empty content is refused locally - nothing is generated and no
    /// network call happens. After the service accepts a write the draft is
    /// locked: further submissions are ignored by design, since the service
    /// stores at most one ciphertext per identifier.
    pub fn submit(&mut self, request: CreateRequest) -> Vec<AppAction> {
        match self.phase {
            Phase::Draft => {
                if request.content.trim().is_empty() {
                    self.status = Some(ClientError::EmptyInput.to_string());
                    return vec![];
                }
                self.phase = Phase::Submitting;
                self.status = Some("encrypting and uploading message...".into());
                vec![AppAction::Submit { request }]
            },
            // Already in flight or already shared; nothing to do
            _ => vec![],
        }
    }

    /// Navigate to a viewer URL.
    ///
    /// A missing key fragment is terminal immediately: the ciphertext is
    /// not even fetched, because nothing could decrypt it.
    pub fn view(&mut self, target: ViewTarget) -> Vec<AppAction> {
        let Some(key) = target.key else {
            self.phase = Phase::MissingKey;
            self.status = Some(ClientError::MissingKey.to_string());
            return vec![];
        };

        self.uid = Some(target.uid.clone());
        self.key = Some(key);
        self.phase = Phase::Loading;
        vec![AppAction::FetchCiphertext { uid: target.uid }]
    }

    /// Cancel a running burn countdown.
    ///
    /// Processed in arrival order like everything else, so a cancellation
    /// consumed before the final tick wins the tie and the delete is never
    /// issued.
    pub fn cancel_burn(&mut self) -> Vec<AppAction> {
        if let Phase::Countdown { message, .. } = &self.phase {
            let message = message.clone();
            self.phase = Phase::Viewing { message };
            self.status = Some("auto-deletion cancelled".into());
        }
        vec![]
    }

    /// Re-issue a delete that failed at the transport layer.
    pub fn retry_delete(&mut self) -> Vec<AppAction> {
        if matches!(self.phase, Phase::Deleted)
            && self.delete_failed
            && let Some(uid) = self.uid.clone()
        {
            self.delete_failed = false;
            return vec![AppAction::Delete { uid }];
        }
        vec![]
    }

    /// Process an event and return follow-up actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::SubmitAccepted { share_url } => {
                if matches!(self.phase, Phase::Submitting) {
                    self.phase = Phase::Shared { share_url };
                    self.status = Some("message created".into());
                }
                vec![]
            },
            AppEvent::SubmitFailed { error } => {
                if matches!(self.phase, Phase::Submitting) {
                    // Back to the editable draft; a retry re-runs the whole
                    // pipeline with a fresh identifier and key
                    self.phase = Phase::Draft;
                    self.status = Some(if error.is_retryable() {
                        format!("{error} - try again")
                    } else {
                        error.to_string()
                    });
                }
                vec![]
            },
            AppEvent::CiphertextReceived { record } => {
                if !matches!(self.phase, Phase::Loading) {
                    return vec![];
                }
                let Some(key) = self.key.clone() else {
                    // Unreachable in practice: Loading is only entered with
                    // a key in hand
                    self.phase = Phase::MissingKey;
                    return vec![];
                };
                self.phase = Phase::Decrypting;
                vec![AppAction::Decrypt { record, key }]
            },
            AppEvent::ReadNotFound => {
                if matches!(self.phase, Phase::Loading) {
                    self.phase = Phase::NotFound;
                    self.key = None;
                }
                vec![]
            },
            AppEvent::ReadFailed { error } => {
                if matches!(self.phase, Phase::Loading) {
                    self.phase = Phase::LoadFailed { message: error.to_string() };
                    self.key = None;
                }
                vec![]
            },
            AppEvent::Decrypted { message } => {
                if matches!(self.phase, Phase::Decrypting) {
                    self.enter_viewing(message);
                }
                vec![]
            },
            AppEvent::DecryptFailed { error } => {
                if matches!(self.phase, Phase::Decrypting) {
                    self.phase = Phase::DecryptFailed;
                    self.key = None;
                    self.status = Some(error.to_string());
                }
                vec![]
            },
            AppEvent::DeleteCompleted => {
                if matches!(self.phase, Phase::Deleted) {
                    self.status = Some("message has been burned".into());
                }
                vec![]
            },
            AppEvent::DeleteFailed { error } => {
                if matches!(self.phase, Phase::Deleted) {
                    self.delete_failed = true;
                    self.status = Some(format!("{error} - delete not confirmed"));
                }
                vec![]
            },
            AppEvent::Tick => self.handle_tick(),
        }
    }

    /// The decrypted message arrives; the server-side burn flag decides the
    /// phase. The key is no longer needed either way.
    fn enter_viewing(&mut self, fetched: FetchedMessage) {
        self.key = None;

        if fetched.metadata_conflict {
            tracing::warn!("burn flag mismatch between envelope and server record");
        }

        let message = ViewedMessage {
            title: fetched.envelope.metadata.title,
            content: fetched.envelope.content,
            data_type: fetched.envelope.metadata.data_type,
            expires_at: fetched.expires_at,
            burn_after_reading: fetched.burn_after_reading,
            metadata_conflict: fetched.metadata_conflict,
        };

        self.phase = if fetched.burn_after_reading {
            Phase::Countdown { message, remaining: COUNTDOWN_START }
        } else {
            Phase::Viewing { message }
        };
    }

    fn handle_tick(&mut self) -> Vec<AppAction> {
        let Phase::Countdown { remaining, .. } = &mut self.phase else {
            // Ticks outside a countdown are noise (a late timer after
            // cancellation, for instance)
            return vec![];
        };

        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return vec![];
        }

        self.phase = Phase::Deleted;

        // Exactly one delete per session reaching zero
        if self.delete_issued {
            return vec![];
        }
        self.delete_issued = true;

        match self.uid.clone() {
            Some(uid) => vec![AppAction::Delete { uid }],
            None => vec![],
        }
    }

    /// Current phase, the whole of what a renderer needs to branch on.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Transient status line. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Share URL once the message is stored. `None` before that.
    pub fn share_url(&self) -> Option<&str> {
        match &self.phase {
            Phase::Shared { share_url } => Some(share_url),
            _ => None,
        }
    }

    /// Remaining countdown ticks, if a countdown is running.
    pub fn countdown_remaining(&self) -> Option<u32> {
        match &self.phase {
            Phase::Countdown { remaining, .. } => Some(*remaining),
            _ => None,
        }
    }

    /// The decrypted message while it is displayed.
    pub fn viewed(&self) -> Option<&ViewedMessage> {
        match &self.phase {
            Phase::Viewing { message } | Phase::Countdown { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
