//! Fuzz target for wire request parsing
//!
//! The server feeds every received line through this parser. Arbitrary
//! input must produce a parse error, never a panic.

#![no_main]

use cinder_core::wire::Request;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = serde_json::from_str::<Request>(data);
});
