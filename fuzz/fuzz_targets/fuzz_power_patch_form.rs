//! Fuzz target: url-encoded body → `PowerPatch`.
//!
//! Arbitrary bytes must never panic the decoder or the patch validator, and
//! an accepted patch may only carry allow-listed keys.

#![no_main]

use libfuzzer_sys::fuzz_target;
use superheroes_core::{collect_fields, PowerPatch};

fuzz_target!(|data: &[u8]| {
    let Ok(pairs) = serde_urlencoded::from_bytes::<Vec<(String, String)>>(data) else {
        return;
    };
    let fields = collect_fields(pairs);
    if PowerPatch::from_fields(&fields).is_ok() {
        assert!(
            fields.keys().all(|k| k == "name" || k == "description"),
            "accepted patch must only contain name/description"
        );
    }
});
