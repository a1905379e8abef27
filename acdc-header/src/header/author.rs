//! The author line, and the author attributes that stand in for it.
//!
//! The author line is the first line of the header that is neither a comment nor an
//! attribute entry:
//!
//! ```text
//! Lorn_Kismet R. Lee <kismet@asciidoctor.org>; Norberto M. Lopes <nlopesml@gmail.com>
//! ```
use crate::{Author, AuthorName, HeaderMetadata, model::is_word_char};

/// How an author entry is split into name parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartitionMode {
    /// An entry of the author line: name words with an optional `<email>`, falling
    /// back to the whole entry for anything else.
    AuthorLine,
    /// The value of an author attribute: up to three whitespace separated parts, no
    /// email. XML tags are ignored for the split.
    NamesOnly,
}

peg::parser! {
    grammar author_line() for str {
        /// Parse an author in various formats:
        /// - "First Middle Last <email>"
        /// - "First Last <email>"
        /// - "First <email>"
        /// - "First Last"
        pub(crate) rule author() -> Author
            = words:(name_part() ++ spaces()) email:email()? ![_] {
                let mut words = words.into_iter().map(|word| word.replace('_', " "));
                let first = words.next().unwrap_or_default();
                let middle = words.next();
                let rest = words.collect::<Vec<_>>();
                let author = if rest.is_empty() {
                    Author::new(&first, None, middle.as_deref())
                } else {
                    Author::new(&first, middle.as_deref(), Some(&rest.join(" ")))
                };
                author.with_email(email)
            }

        rule name_part() -> &'input str
            = $(word_char() (word_char() / ['-' | '\'' | '.'])*)

        rule word_char() = [c if is_word_char(c)]

        rule spaces() = " "+

        rule email() -> &'input str
            = spaces() "<" email:$([^'>']+) ">" { email }
    }
}

/// Split an author line into entries at `"; "` and at a `;` ending the line.
///
/// A `;` followed by anything else is part of the name, so `Joe Doe;Smith Johnson` is a
/// single entry.
#[must_use]
pub fn split_author_line(line: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    for (index, _) in line.match_indices(';') {
        let after = line.get(index + 1..).unwrap_or_default();
        if after.is_empty() || after.starts_with(' ') {
            entries.push(line.get(start..index).unwrap_or_default());
            start = (index + 2).min(line.len());
        }
    }
    entries.push(line.get(start..).unwrap_or_default());
    entries
}

/// Partition author entries into names. Entries that are blank are skipped.
pub fn process_authors<'a, I>(entries: I, mode: PartitionMode) -> Vec<AuthorName>
where
    I: IntoIterator<Item = &'a str>,
{
    entries
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match mode {
            PartitionMode::AuthorLine => partition_author_line_entry(entry),
            PartitionMode::NamesOnly => partition_names(entry),
        })
        .collect()
}

fn partition_author_line_entry(entry: &str) -> AuthorName {
    match author_line::author(entry) {
        Ok(author) => AuthorName::Structured(author),
        Err(error) => {
            tracing::trace!(%entry, %error, "author entry does not follow the name rules");
            AuthorName::Unstructured(collapse_whitespace(entry))
        }
    }
}

fn partition_names(entry: &str) -> AuthorName {
    let (display, text) = if entry.contains('<') {
        (Some(entry.replace('_', " ")), strip_xml_tags(entry))
    } else {
        (None, entry.to_string())
    };

    let mut words = text.split_whitespace().map(|word| word.replace('_', " "));
    let Some(first) = words.next() else {
        return AuthorName::Unstructured(display.unwrap_or(text));
    };
    let second = words.next();
    let rest = words.collect::<Vec<_>>();
    let author = if rest.is_empty() {
        Author::new(&first, None, second.as_deref())
    } else {
        Author::new(&first, second.as_deref(), Some(&rest.join(" ")))
    };
    AuthorName::Structured(match display {
        Some(display) => author.with_name(display),
        None => author,
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop `<...>` tags, keeping the text between them.
fn strip_xml_tags(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let (before, tag) = rest.split_at(open);
        result.push_str(before);
        match tag.find('>') {
            Some(close) if close > 1 => rest = tag.get(close + 1..).unwrap_or_default(),
            _ => {
                result.push('<');
                rest = tag.get(1..).unwrap_or_default();
            }
        }
    }
    result.push_str(rest);
    result
}

/// The metadata key of `key` for author `index`.
pub(crate) fn suffixed(key: &str, index: usize) -> String {
    format!("{key}_{index}")
}

/// Build the author keys of the header metadata.
///
/// A single author gets unsuffixed keys. Several authors get `<key>_<N>` for each,
/// with the unsuffixed keys describing the first one. `authors` lists every name and
/// `authorcount` counts them.
#[must_use]
pub fn author_metadata(authors: &[AuthorName]) -> HeaderMetadata {
    let mut metadata = HeaderMetadata::new();
    let several = authors.len() > 1;
    for (index, author) in authors.iter().enumerate() {
        let number = index + 1;
        for (key, value) in author.fields() {
            if !several {
                metadata.insert_text(key, value);
                continue;
            }
            if number == 1 {
                metadata.insert_text(key, value.clone());
            }
            metadata.insert_text(suffixed(key, number), value);
        }
    }
    if !authors.is_empty() {
        let names = authors.iter().map(AuthorName::name).collect::<Vec<_>>();
        metadata.insert_text("authors", names.join(", "));
    }
    metadata.insert_count("authorcount", authors.len());
    metadata
}

/// Rebuild the text of author `number` from its name parts, as found in `metadata`,
/// so it partitions the same way again. Inner spaces become `_`.
pub(crate) fn rebuild_author_entry(metadata: &HeaderMetadata, number: usize) -> String {
    ["firstname", "middlename", "lastname"]
        .into_iter()
        .filter_map(|key| metadata.text(&suffixed(key, number)))
        .map(|part| part.replace(' ', "_"))
        .collect::<Vec<_>>()
        .join(" ")
}
