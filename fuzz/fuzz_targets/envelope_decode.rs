//! Fuzz target for Envelope::decode
//!
//! Decryption hands this parser attacker-influenced bytes (a tampered blob
//! that somehow authenticated, a hostile envelope sealed by the sender
//! themselves). Decoding must either produce an envelope or return
//! `MalformedEnvelope` - it must never panic.

#![no_main]

use cinder_core::Envelope;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = Envelope::decode(data);
});
