//! Fuzz target for TransportBlob::decode and the open path
//!
//! The transport string comes straight off the wire. Decode must reject
//! short and malformed blobs without panicking, and whatever decodes must
//! flow through `open` without panicking either.

#![no_main]

use cinder_crypto::{TransportBlob, open};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(blob) = TransportBlob::decode(data) {
        // Any structurally valid blob must fail authentication cleanly
        let _ = open(&blob, "fuzz-key");
    }
});
