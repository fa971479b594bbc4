#![no_main]

use ballot_types::{extract_selector, selector_from_calldata};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = selector_from_calldata(data);

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(selector) = extract_selector(text) {
            assert!(selector.starts_with("0x"));
            assert!(selector.len() <= 10);
            assert_eq!(extract_selector(&selector).as_deref(), Ok(selector.as_str()));
        }
    }
});
