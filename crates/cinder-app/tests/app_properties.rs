//! Property-based tests for the session state machine.
//!
//! Invariants checked under arbitrary event sequences: the machine never
//! panics, a session issues at most one delete, cancellation permanently
//! suppresses deletion, and terminal phases are stable.

use chrono::DateTime;
use cinder_app::{App, AppAction, AppEvent, Phase};
use cinder_client::{ClientError, FetchedMessage, ViewTarget};
use cinder_core::{ContentType, Envelope, KeyString, Message, MessageId};
use proptest::prelude::*;

fn record(burn: bool) -> Message {
    Message {
        uid: MessageId::parse("abcd1234").unwrap(),
        encrypted_data: "AAAA".into(),
        expires_at: DateTime::UNIX_EPOCH,
        burn_after_reading: burn,
    }
}

fn fetched(envelope_burn: bool, server_burn: bool) -> FetchedMessage {
    FetchedMessage {
        envelope: Envelope::new("body".into(), "t", ContentType::Text, envelope_burn),
        expires_at: DateTime::UNIX_EPOCH,
        burn_after_reading: server_burn,
        metadata_conflict: envelope_burn != server_burn,
    }
}

fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        8 => Just(AppEvent::Tick),
        1 => Just(AppEvent::SubmitAccepted { share_url: "https://o/txt/a#k".into() }),
        1 => Just(AppEvent::SubmitFailed {
            error: ClientError::Transport("down".into()),
        }),
        2 => any::<bool>().prop_map(|burn| AppEvent::CiphertextReceived {
            record: record(burn),
        }),
        1 => Just(AppEvent::ReadNotFound),
        1 => Just(AppEvent::ReadFailed { error: ClientError::Transport("down".into()) }),
        2 => (any::<bool>(), any::<bool>())
            .prop_map(|(e, s)| AppEvent::Decrypted { message: fetched(e, s) }),
        1 => Just(AppEvent::DecryptFailed { error: ClientError::DecryptionFailed }),
        1 => Just(AppEvent::DeleteCompleted),
        1 => Just(AppEvent::DeleteFailed { error: ClientError::Transport("down".into()) }),
    ]
}

fn viewer_app() -> App {
    let mut app = App::new();
    let _ = app.view(ViewTarget {
        uid: MessageId::parse("abcd1234").unwrap(),
        key: KeyString::parse("fragment-key"),
    });
    app
}

fn count_deletes(actions: &[AppAction]) -> usize {
    actions.iter().filter(|a| matches!(a, AppAction::Delete { .. })).count()
}

proptest! {
    #[test]
    fn at_most_one_delete_per_session(
        events in prop::collection::vec(event_strategy(), 0..80),
    ) {
        let mut app = viewer_app();
        let mut deletes = 0;
        for event in events {
            deletes += count_deletes(&app.handle(event));
        }
        prop_assert!(deletes <= 1);
    }

    #[test]
    fn cancellation_permanently_suppresses_deletion(
        before in prop::collection::vec(Just(AppEvent::Tick), 0..14),
        after in prop::collection::vec(event_strategy(), 0..60),
    ) {
        let mut app = viewer_app();
        let _ = app.handle(AppEvent::CiphertextReceived { record: record(true) });
        let _ = app.handle(AppEvent::Decrypted { message: fetched(true, true) });
        prop_assert!(matches!(app.phase(), Phase::Countdown { .. }), "expected Countdown phase");

        // Up to fourteen ticks elapse, then the viewer cancels
        let mut deletes = 0;
        for event in before {
            deletes += count_deletes(&app.handle(event));
        }
        let _ = app.cancel_burn();
        prop_assert!(matches!(app.phase(), Phase::Viewing { .. }), "expected Viewing phase");

        // Nothing after the cancellation may trigger the delete
        for event in after {
            deletes += count_deletes(&app.handle(event));
        }
        prop_assert_eq!(deletes, 0);
    }

    #[test]
    fn terminal_phases_are_stable(
        events in prop::collection::vec(event_strategy(), 0..40),
    ) {
        for terminal in [Phase::NotFound, Phase::DecryptFailed, Phase::MissingKey] {
            let mut app = viewer_app();
            // Drive the machine into the terminal phase
            match &terminal {
                Phase::NotFound => {
                    let _ = app.handle(AppEvent::ReadNotFound);
                },
                Phase::DecryptFailed => {
                    let _ = app.handle(AppEvent::CiphertextReceived { record: record(false) });
                    let _ = app.handle(AppEvent::DecryptFailed {
                        error: ClientError::DecryptionFailed,
                    });
                },
                _ => {
                    let mut fresh = App::new();
                    let _ = fresh.view(ViewTarget {
                        uid: MessageId::parse("abcd1234").unwrap(),
                        key: None,
                    });
                    app = fresh;
                },
            }
            prop_assert_eq!(app.phase(), &terminal);

            for event in events.clone() {
                let actions = app.handle(event);
                prop_assert!(actions.is_empty());
                prop_assert_eq!(app.phase(), &terminal);
            }
        }
    }

    #[test]
    fn server_burn_flag_decides_the_countdown(
        envelope_burn in any::<bool>(),
        server_burn in any::<bool>(),
    ) {
        let mut app = viewer_app();
        let _ = app.handle(AppEvent::CiphertextReceived { record: record(server_burn) });
        let _ = app.handle(AppEvent::Decrypted {
            message: fetched(envelope_burn, server_burn),
        });

        // The envelope's copy is display metadata; the server's copy drives
        if server_burn {
            prop_assert!(matches!(app.phase(), Phase::Countdown { .. }), "expected Countdown phase");
        } else {
            prop_assert!(matches!(app.phase(), Phase::Viewing { .. }), "expected Viewing phase");
        }
    }
}
