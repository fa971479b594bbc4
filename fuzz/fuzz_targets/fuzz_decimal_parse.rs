#![no_main]

use ballot_types::{from_fixed, to_fixed, Decimal};
use libfuzzer_sys::fuzz_target;

// Parsing arbitrary text never panics; whatever parses prints back to itself
// and survives the fixed-point codec up to truncation.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = text.parse::<Decimal>() else {
        return;
    };

    let reparsed: Decimal = value.to_string().parse().expect("display output must parse");
    assert_eq!(reparsed, value);

    if let Ok(raw) = to_fixed(&value) {
        let back = from_fixed(raw);
        assert!(back <= value);
        assert_eq!(to_fixed(&back).expect("truncated value fits"), raw);
    }
});
