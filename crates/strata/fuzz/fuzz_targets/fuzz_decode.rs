//! Fuzz target for the table codec.
//!
//! Decoding must never panic, and anything that decodes must re-encode.

#![no_main]

use libfuzzer_sys::fuzz_target;
use strata::TableCodec;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let codec = TableCodec::new();
    if let Ok(table) = codec.decode(data) {
        let _ = codec.encode(&table);
    }
});
