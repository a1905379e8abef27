//! Header metadata extraction.
//!
//! The header is made of an optional author line, an optional revision line right
//! below it, and attribute entries and comments around both. It ends at the first
//! blank line or at a `///` line.
pub mod author;
mod entry;
pub(crate) mod reader;
pub mod revision;

use crate::{Document, DocumentAttributes, HeaderMetadata};

use author::{
    PartitionMode, author_metadata, process_authors, rebuild_author_entry, split_author_line,
    suffixed,
};
use reader::LineReader;
use revision::parse_revision_line;

pub use entry::{sanitize_attribute_name, store_attribute};

/// What the author line contributed, and what the document held right after it was
/// merged.
#[derive(Debug, Default)]
struct ImplicitAuthors {
    metadata: HeaderMetadata,
    /// Set when an author line was found, even one without any author in it.
    count: Option<usize>,
    author: Option<String>,
    initials: Option<String>,
    authors: Option<String>,
}

impl ImplicitAuthors {
    fn from_line(line: &str) -> Self {
        tracing::debug!(%line, "found author line");
        let authors = process_authors(split_author_line(line), PartitionMode::AuthorLine);
        Self {
            metadata: author_metadata(&authors),
            count: Some(authors.len()),
            ..Self::default()
        }
    }

    /// Write the implicit authors into the document, keeping what it already holds.
    fn merge_into(&mut self, document: &mut Document) {
        let count = self.count.unwrap_or_default();
        document
            .attributes_mut()
            .overwrite("authorcount", count.to_string());
        if count == 0 {
            return;
        }
        for (key, value) in self.metadata.iter() {
            if let Some(text) = value.as_text() {
                let text = document.apply_header_subs(text);
                document.attributes_mut().insert_if_absent(key, text);
            }
        }
        let attributes = document.attributes();
        self.author = attributes.get("author").map(ToString::to_string);
        self.initials = attributes.get("authorinitials").map(ToString::to_string);
        self.authors = attributes.get("authors").map(ToString::to_string);
    }

    fn matches_authors(&self, authors: &str) -> bool {
        let Some(implicit) = self.authors.as_deref() else {
            return false;
        };
        implicit == authors || implicit == split_author_line(authors).join(", ")
    }

    /// The merged `authors` value, when the document holds the same authors written
    /// with the author line separator instead.
    fn normalized_authors(&self, attributes: &DocumentAttributes) -> Option<String> {
        let implicit = self.authors.as_deref()?;
        let explicit = attributes.get("authors")?;
        let same_authors = split_author_line(explicit).join(", ") == implicit;
        (explicit != implicit && same_authors).then(|| implicit.to_string())
    }
}

/// Parse the metadata out of the header lines of a document.
///
/// Returns the metadata found, and the lines that follow the header. With a document,
/// attribute entries are stored in it, implicit author and revision values fill in
/// the attributes it does not hold yet, and explicit author attributes override the
/// author line. Without one, only the author and revision lines are read.
#[tracing::instrument(level = "trace", skip_all)]
pub fn parse_header_metadata<'a, L: AsRef<str>>(
    lines: &'a [L],
    mut document: Option<&mut Document>,
) -> (HeaderMetadata, &'a [L]) {
    let mut reader = LineReader::new(lines);
    entry::process_attribute_entries(&mut reader, document.as_deref_mut());

    let mut implicit = ImplicitAuthors::default();
    let mut revision = HeaderMetadata::new();
    if let Some(line) = reader.peek_content() {
        reader.advance();
        implicit = ImplicitAuthors::from_line(line);
        if let Some(document) = document.as_deref_mut() {
            implicit.merge_into(document);
        }

        entry::process_attribute_entries(&mut reader, document.as_deref_mut());
        if let Some(revision_line) = reader.peek_content().and_then(parse_revision_line) {
            reader.advance();
            revision = revision_line.metadata();
            if let Some(document) = document.as_deref_mut() {
                for (key, value) in revision_line.fields() {
                    let value = document.apply_header_subs(value);
                    document.attributes_mut().insert_if_absent(key, value);
                }
            }
        }

        entry::process_attribute_entries(&mut reader, document.as_deref_mut());
        reader.skip_blank_lines();
    }

    let overrides = document.and_then(|document| apply_author_overrides(document, &implicit));

    let mut metadata = implicit.metadata;
    metadata.merge(revision);
    if let Some(overrides) = overrides {
        metadata.merge(overrides);
    }
    (metadata, reader.remaining())
}

/// Resolve the author attributes that override, or stand in for, the author line.
///
/// Returns the metadata of the overriding authors, or `None` when the author line
/// stands.
fn apply_author_overrides(
    document: &mut Document,
    implicit: &ImplicitAuthors,
) -> Option<HeaderMetadata> {
    if let Some(authors) = implicit.normalized_authors(document.attributes()) {
        document.attributes_mut().overwrite("authors", authors);
    }

    let attributes = document.attributes();
    let overrides = if let Some(author) = attributes
        .get("author")
        .filter(|author| Some(*author) != implicit.author.as_deref())
    {
        let author = document.render(author);
        let mut overrides =
            author_metadata(&process_authors([author.as_str()], PartitionMode::NamesOnly));
        if attributes.get("authorinitials") != implicit.initials.as_deref() {
            overrides.remove("authorinitials");
        }
        overrides
    } else if let Some(authors) = attributes
        .get("authors")
        .filter(|authors| !implicit.matches_authors(authors))
    {
        author_metadata(&process_authors(
            split_author_line(authors),
            PartitionMode::NamesOnly,
        ))
    } else {
        indexed_author_overrides(attributes, &implicit.metadata)
    };

    if overrides.author_count() == Some(0) {
        if implicit.count.is_some() {
            return None;
        }
        document
            .attributes_mut()
            .overwrite("authorcount", "0".to_string());
        return Some(overrides);
    }

    tracing::debug!(?overrides, "author attributes override the author line");
    let attributes = document.attributes_mut();
    for (key, value) in overrides.iter() {
        attributes.overwrite(key, value.to_string());
    }
    if attributes.get("email").is_none() {
        if let Some(email) = attributes.get("email_1").map(ToString::to_string) {
            attributes.overwrite("email", email);
        }
    }
    Some(overrides)
}

/// `author_<N>` attributes that differ from the author line replace the authors at
/// those positions. The others are rebuilt from their name parts.
fn indexed_author_overrides(
    attributes: &DocumentAttributes,
    implicit: &HeaderMetadata,
) -> HeaderMetadata {
    let entries = (1..)
        .map_while(|number| {
            let key = suffixed("author", number);
            let value = attributes.get(&key)?;
            Some((implicit.text(&key) != Some(value)).then(|| value.to_string()))
        })
        .collect::<Vec<_>>();

    if entries.iter().all(Option::is_none) {
        let mut metadata = HeaderMetadata::new();
        metadata.insert_count("authorcount", 0);
        return metadata;
    }

    let entries = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry.unwrap_or_else(|| rebuild_author_entry(implicit, index + 1)))
        .collect::<Vec<_>>();
    author_metadata(&process_authors(
        entries.iter().map(String::as_str),
        PartitionMode::NamesOnly,
    ))
}
