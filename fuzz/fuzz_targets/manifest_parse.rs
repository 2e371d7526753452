//! Fuzz target for manifest parsing.
//!
//! Feeds arbitrary bytes to the lenient manifest reader and checks that
//! every set of pairs it accepts survives a write/read cycle.

#![no_main]

use datecrawl::dataset::manifest::{from_manifest_slice, from_manifest_str, to_manifest_string};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(pairs) = from_manifest_slice(data) else {
        return;
    };
    // Accepted pairs may still hold characters the strict writer refuses.
    if let Ok(text) = to_manifest_string(&pairs) {
        let restored = from_manifest_str(&text).expect("written manifest parses");
        assert_eq!(restored, pairs);
    }
});
