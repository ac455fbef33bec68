//! Session runtime.
//!
//! Executes the actions the state machine produces against a
//! [`StorageService`], feeding results back in as events until the machine
//! settles. One logical thread of control: the only suspension points are
//! the create, read, and delete network calls, plus the countdown timer.

use std::time::Duration;

use cinder_client::{StorageService, create_message, decrypt_record};
use cinder_core::Environment;

use crate::{App, AppAction, AppEvent, Phase};

/// Seconds per countdown tick.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drives one session against a storage service.
pub struct Runtime<S: StorageService, E: Environment> {
    app: App,
    service: S,
    env: E,
    origin: String,
}

impl<S: StorageService, E: Environment> Runtime<S, E> {
    /// Create a runtime for a fresh session.
    ///
    /// `origin` is the base URL share links are built against.
    pub fn new(service: S, env: E, origin: impl Into<String>) -> Self {
        Self { app: App::new(), service, env, origin: origin.into() }
    }

    /// Read-only view of the session state for presentation.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Submit a draft. Resolves when the machine settles.
    pub async fn submit(&mut self, request: cinder_client::CreateRequest) {
        let actions = self.app.submit(request);
        self.process(actions).await;
    }

    /// Navigate to a viewer target. Resolves when the machine settles
    /// (in `Viewing`, `Countdown`, or a terminal phase).
    pub async fn view(&mut self, target: cinder_client::ViewTarget) {
        let actions = self.app.view(target);
        self.process(actions).await;
    }

    /// Cancel a running burn countdown.
    pub async fn cancel_burn(&mut self) {
        let actions = self.app.cancel_burn();
        self.process(actions).await;
    }

    /// Deliver one countdown tick.
    pub async fn tick(&mut self) {
        let actions = self.app.handle(AppEvent::Tick);
        self.process(actions).await;
    }

    /// Retry a delete that failed at the transport layer.
    pub async fn retry_delete(&mut self) {
        let actions = self.app.retry_delete();
        self.process(actions).await;
    }

    /// Run the burn countdown to completion or cancellation.
    ///
    /// A single periodic timer, one tick per interval. Cancellation is
    /// cooperative: it is observed at the next tick boundary, before that
    /// tick's action.
    pub async fn run_countdown(&mut self) {
        while matches!(self.app.phase(), Phase::Countdown { .. }) {
            self.env.sleep(TICK_INTERVAL).await;
            self.tick().await;
        }
    }

    /// Execute actions, looping events back until none remain.
    async fn process(&mut self, initial_actions: Vec<AppAction>) {
        let mut pending = initial_actions;

        while !pending.is_empty() {
            let actions = std::mem::take(&mut pending);

            for action in actions {
                for event in self.execute(action).await {
                    pending.extend(self.app.handle(event));
                }
            }
        }
    }

    /// Perform one action's side effect and translate the outcome.
    async fn execute(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::Submit { request } => {
                match create_message(&self.service, &self.env, &self.origin, request).await {
                    Ok(created) => {
                        vec![AppEvent::SubmitAccepted { share_url: created.share_url }]
                    },
                    Err(error) => vec![AppEvent::SubmitFailed { error }],
                }
            },
            AppAction::FetchCiphertext { uid } => match self.service.read(&uid).await {
                Ok(Some(record)) => vec![AppEvent::CiphertextReceived { record }],
                Ok(None) => vec![AppEvent::ReadNotFound],
                Err(error) => vec![AppEvent::ReadFailed { error: error.into() }],
            },
            AppAction::Decrypt { record, key } => match decrypt_record(&record, &key) {
                Ok(message) => vec![AppEvent::Decrypted { message }],
                Err(error) => vec![AppEvent::DecryptFailed { error }],
            },
            AppAction::Delete { uid } => match self.service.delete(&uid).await {
                // Already-gone is success: the delete is idempotent
                Ok(_) => vec![AppEvent::DeleteCompleted],
                Err(error) => vec![AppEvent::DeleteFailed { error: error.into() }],
            },
        }
    }
}
