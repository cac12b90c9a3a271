//! Fuzz target: url-encoded body → `NewHeroPower`.
//!
//! Arbitrary bytes must never panic, and an accepted association must carry
//! exactly the submitted ids.

#![no_main]

use libfuzzer_sys::fuzz_target;
use superheroes_core::{collect_fields, NewHeroPower};

fuzz_target!(|data: &[u8]| {
    let Ok(pairs) = serde_urlencoded::from_bytes::<Vec<(String, String)>>(data) else {
        return;
    };
    let fields = collect_fields(pairs);
    if let Ok(new) = NewHeroPower::from_fields(&fields) {
        let submitted = fields.get("hero_id").and_then(|s| s.trim().parse::<i64>().ok());
        assert_eq!(submitted, Some(new.hero_id.get()), "hero_id must round-trip");
        assert!(!new.strength.is_empty(), "strength must be non-blank");
    }
});
