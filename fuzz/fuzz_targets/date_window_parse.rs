//! Fuzz target for date window parsing.

#![no_main]

use datecrawl::acquire::DateWindow;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(window) = input.parse::<DateWindow>() {
        assert!(window.start() <= window.end());
        assert_eq!(window.to_string().parse::<DateWindow>().ok(), Some(window));
    }
});
