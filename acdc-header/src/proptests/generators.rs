//! Custom input generators for property-based testing
#![allow(clippy::expect_used)]
use proptest::prelude::*;

/// Attribute names as they appear in attribute entries: a word character followed
/// by word characters and `-`, lower-case.
pub fn attribute_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z0-9_-]{0,15}")
        .expect("Failed to create attribute name strategy")
}

/// Attribute values without attribute references.
pub fn plain_value() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[a-zA-Z0-9 .,:;!?/-]{0,40}")
        .expect("Failed to create plain value strategy")
}

/// Values made of text chunks and `{name}` references.
pub fn value_with_references() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            plain_value(),
            attribute_name().prop_map(|name| format!("{{{name}}}")),
        ],
        0..6,
    )
    .prop_map(|chunks| chunks.join(""))
}

/// Lines of a verbatim block: an indentation of spaces, then text that does not
/// start with whitespace. Some lines are blank.
pub fn indented_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0..12usize, "[a-z][a-z ]{0,20}")
                .prop_map(|(indent, text)| format!("{}{text}", " ".repeat(indent))),
            1 => Just(String::new()),
        ],
        1..12,
    )
}

/// Like [`indented_lines`], but the indentation mixes spaces and tabs and the text
/// may hold tabs too.
pub fn tabbed_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            3 => ("[ \t]{0,8}", "[a-z][a-z \t]{0,20}")
                .prop_map(|(indent, text)| format!("{indent}{text}")),
            1 => Just(String::new()),
        ],
        1..12,
    )
}
