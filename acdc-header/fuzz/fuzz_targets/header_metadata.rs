#![no_main]

use acdc_header::{Document, Options};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string, ignoring invalid UTF-8
    if let Ok(input) = std::str::from_utf8(data) {
        let options = Options::builder().with_attribute("locked", "value").build();
        let mut document = Document::new(&options);
        let lines = input.lines().collect::<Vec<_>>();

        // Header parsing never fails, it only has to terminate without panicking
        let (_, remaining) = document.parse_header(&lines);
        assert!(remaining.len() <= lines.len());
        assert_eq!(document.attributes().get("locked"), Some("value"));
    }
});
