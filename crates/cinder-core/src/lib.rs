//! Core domain types for the cinder encrypted paste service.
//!
//! Everything here is pure logic with no I/O: content classification,
//! lifetime tiers, identifier/key generation, the plaintext envelope codec,
//! and the wire records shared by client and server. System resources (time,
//! entropy) are reached only through the [`Environment`] capability trait so
//! the same code runs deterministically under test.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod content_type;
pub mod env;
pub mod envelope;
pub mod ident;
pub mod message;
pub mod tier;
pub mod wire;

pub use content_type::{ContentType, detect};
pub use env::{Environment, FixedEnv, SystemEnv};
pub use envelope::{DEFAULT_TITLE, Envelope, EnvelopeError, EnvelopeMetadata};
pub use ident::{KeyString, MessageId, generate};
pub use message::Message;
pub use tier::LifetimeTier;
