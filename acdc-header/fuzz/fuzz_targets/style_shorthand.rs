#![no_main]

use acdc_header::{ElementAttributes, parse_style_attribute};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut attributes = ElementAttributes::new().with_positional(1, Some(input));
        let _ = parse_style_attribute(&mut attributes);
        // The positional value is never rewritten
        assert_eq!(attributes.positional(1), Some(input));
    }
});
