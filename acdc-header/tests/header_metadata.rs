use std::sync::Arc;

use acdc_header::{
    AnchorKind, AttributeEntry, Document, ElementAttributes, HeaderMetadata, MemoryLogger,
    MetadataValue, Options, parse_header_metadata, parse_style_attribute, store_attribute,
};
use pretty_assertions::assert_eq;

fn lines(input: &str) -> Vec<&str> {
    input.lines().collect()
}

fn metadata_of(input: &str) -> HeaderMetadata {
    parse_header_metadata(lines(input).as_slice(), None).0
}

#[rstest::rstest]
#[case::latin("Stéphane Brontë", "Stéphane", Some("Brontë"), "SB")]
#[case::ideographic("李 四 <si.li@example.com>", "李", Some("四"), "李四")]
#[case::underscore("Tim_E Fella", "Tim E", Some("Fella"), "TF")]
#[case::single_quote(
    "Stephen O'Grady <founder@redmonk.com>",
    "Stephen",
    Some("O'Grady"),
    "SO"
)]
fn test_author_names(
    #[case] line: &str,
    #[case] firstname: &str,
    #[case] lastname: Option<&str>,
    #[case] initials: &str,
) {
    let metadata = metadata_of(line);
    assert_eq!(metadata.text("firstname"), Some(firstname));
    assert_eq!(metadata.text("lastname"), lastname);
    assert_eq!(metadata.text("authorinitials"), Some(initials));
    assert_eq!(metadata.author_count(), Some(1));
}

#[test]
fn test_multiple_authors() {
    let metadata = metadata_of(
        "Doc Writer <doc.writer@asciidoc.org>; John Smith <john.smith@asciidoc.org>",
    );
    assert_eq!(metadata.author_count(), Some(2));
    assert_eq!(metadata.text("authors"), Some("Doc Writer, John Smith"));
    assert_eq!(metadata.text("author"), Some("Doc Writer"));
    assert_eq!(metadata.text("author_1"), Some("Doc Writer"));
    assert_eq!(metadata.text("author_2"), Some("John Smith"));
    assert_eq!(metadata.text("email_2"), Some("john.smith@asciidoc.org"));
}

#[rstest::rstest]
#[case::blank_entries("Doc Writer; ; John Smith <john.smith@asciidoc.org>;", 2)]
#[case::no_space_after_semicolon("Joe Doe;Smith Johnson", 1)]
fn test_author_count(#[case] line: &str, #[case] count: usize) {
    assert_eq!(metadata_of(line).author_count(), Some(count));
}

#[test]
fn test_comments_before_author_line() {
    for input in [
        "// Asciidoctor\n// release artist\nRyan Waldron",
        "////\nAsciidoctor\nrelease artist\n////\nRyan Waldron",
    ] {
        let metadata = metadata_of(input);
        assert_eq!(metadata.len(), 6);
        assert_eq!(metadata.text("author"), Some("Ryan Waldron"));
        assert_eq!(metadata.text("authorinitials"), Some("RW"));
    }
}

#[test]
fn test_revision_references_are_kept_raw_without_document() {
    let metadata =
        metadata_of("Author Name\nv{project-version}, {release-date}: {release-summary}");
    assert_eq!(metadata.len(), 9);
    assert_eq!(metadata.text("revnumber"), Some("{project-version}"));
    assert_eq!(metadata.text("revdate"), Some("{release-date}"));
    assert_eq!(metadata.text("revremark"), Some("{release-summary}"));
}

#[test]
fn test_revision_references_resolve_against_document() {
    let options = Options::builder()
        .with_attributes([
            ("project-version", "1.0.1"),
            ("release-date", "2018-05-15"),
            ("release-summary", "The one you can count on!"),
        ])
        .build();
    let mut document = Document::new(&options);
    let input = lines("Author Name\n{project-version}, {release-date}: {release-summary}");
    document.parse_header(&input);

    let attributes = document.attributes();
    assert_eq!(attributes.get("revnumber"), Some("1.0.1"));
    assert_eq!(attributes.get("revdate"), Some("2018-05-15"));
    assert_eq!(
        attributes.get("revremark"),
        Some("The one you can count on!")
    );
}

#[test]
fn test_author_without_space_after_joiner_in_several_authors() {
    let mut document = Document::default();
    document.parse_header(&["Kismet Chameleon; Lazarus het_Draeke"]);
    let attributes = document.attributes();
    assert_eq!(attributes.get("authorcount"), Some("2"));
    assert_eq!(
        attributes.get("authors"),
        Some("Kismet Chameleon, Lazarus het Draeke")
    );
    assert_eq!(attributes.get("author_2"), Some("Lazarus het Draeke"));
    assert_eq!(attributes.get("lastname_2"), Some("het Draeke"));
}

#[test]
fn test_formatting_removed_before_partitioning_author_attribute() {
    let renderer = |text: &str| {
        text.strip_prefix("pass:n[http://example.org/community/team.html[")
            .and_then(|rest| rest.strip_suffix("]]"))
            .map_or_else(
                || text.to_string(),
                |label| {
                    let label = label
                        .replacen("**", "<strong>", 1)
                        .replacen("**", "</strong>", 1);
                    format!(r#"<a href="http://example.org/community/team.html">{label}</a>"#)
                },
            )
    };
    let mut document = Document::default().with_renderer(renderer);
    document.parse_header(&[
        ":author: pass:n[http://example.org/community/team.html[Ze_**Project** team]]",
    ]);

    let attributes = document.attributes();
    assert_eq!(attributes.get("authorcount"), Some("1"));
    assert_eq!(
        attributes.get("authors"),
        Some(
            r#"<a href="http://example.org/community/team.html">Ze <strong>Project</strong> team</a>"#
        )
    );
    assert_eq!(attributes.get("firstname"), Some("Ze Project"));
    assert_eq!(attributes.get("lastname"), Some("team"));
}

#[test]
fn test_explicit_authorinitials_after_author_line() {
    let mut document = Document::default();
    document.parse_header(&["Jean-Claude Van Damme", ":authorinitials: JCVD"]);
    assert_eq!(document.attributes().get("authorinitials"), Some("JCVD"));
}

#[test]
fn test_no_authors() {
    let (metadata, remaining) = parse_header_metadata::<&str>(&[], None);
    assert!(metadata.is_empty());
    assert!(remaining.is_empty());

    let mut document = Document::default();
    let (metadata, _) = document.parse_header::<&str>(&[]);
    assert_eq!(metadata.get("authorcount"), Some(&MetadataValue::Count(0)));
    assert_eq!(document.attributes().get("authorcount"), Some("0"));
}

#[test]
fn test_header_entries_are_recorded() {
    let mut document = Document::default();
    document.parse_header(&[":toc: left", "Doc Writer", ":sectnums!:"]);
    assert_eq!(
        document.attributes().entries(),
        &[
            AttributeEntry::new("toc", Some("left".to_string())),
            AttributeEntry::new("sectnums", None),
        ]
    );
}

#[test]
fn test_store_attribute_record_without_document() {
    let mut record = Vec::new();
    let _ = store_attribute("foo", Some("bar"), None, Some(&mut record));
    let _ = store_attribute("!foo", None, None, Some(&mut record));
    assert_eq!(
        record,
        vec![
            AttributeEntry::new("foo", Some("bar".to_string())),
            AttributeEntry::new("foo", None),
        ]
    );
}

#[test]
fn test_style_shorthand() {
    let mut attributes = ElementAttributes::new().with_positional(1, Some("style#id.role1.role2"));
    assert_eq!(
        parse_style_attribute(&mut attributes).as_deref(),
        Some("style")
    );
    assert_eq!(attributes.get("style"), Some("style"));
    assert_eq!(attributes.get("id"), Some("id"));
    assert_eq!(attributes.get("role"), Some("role1 role2"));
    assert_eq!(attributes.positional(1), Some("style#id.role1.role2"));
}

#[test]
fn test_inline_anchor_already_in_use() {
    let logger = Arc::new(MemoryLogger::new());
    let mut document = Document::default().with_logger(logger.clone());

    // [#in-use] above the first paragraph, then [[in-use]] on line 5.
    let mut block = ElementAttributes::new().with_positional(1, Some("#in-use"));
    document.parse_style_attribute(&mut block, &document.location(1));
    let id = block.get("id").unwrap_or_default().to_string();
    assert!(document.register_anchor(&id, AnchorKind::Block, &document.location(1)));
    assert!(!document.register_anchor("in-use", AnchorKind::Anchor, &document.location(5)));

    assert_eq!(
        logger.messages(),
        vec!["<stdin>: line 5: id assigned to anchor already in use: in-use"]
    );
}
