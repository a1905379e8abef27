//! Attribute entries: `:name: value` lines.
use crate::{
    AttributeEntry, Document, Error, Location,
    header::reader::LineReader,
    model::{is_word_char, strip_negation},
};

/// Line continuation markers, current and legacy.
const CONTINUATIONS: [&str; 2] = [" \\", " +"];
const HARD_LINE_BREAK: &str = " +";

peg::parser! {
    grammar attribute_entry() for str {
        /// `:name: value`, `:name!:` or `:!name:`. The value, when present, is separated
        /// from the name by spaces or tabs.
        pub(crate) rule entry() -> (&'input str, Option<&'input str>)
            = ":" name:name() ":" value:value()? ![_] { (name, value) }

        rule name() -> &'input str = $("!"? word_char() [^':']*)

        rule word_char() = [c if is_word_char(c)]

        rule value() -> &'input str = [' ' | '\t']+ value:$([_]*) { value }
    }
}

/// Remove every character that is neither a word character nor `-`, then lower-case.
#[must_use]
pub fn sanitize_attribute_name(name: &str) -> String {
    name.chars()
        .filter(|c| is_word_char(*c) || *c == '-')
        .collect::<String>()
        .to_lowercase()
}

/// Store an attribute the way an attribute entry does.
///
/// The name is stripped of its negation (which forces the value to be unset),
/// sanitized and mapped through the attribute aliases (`numbered`, `hardbreaks`,
/// `showtitle`). With a document, relative `leveloffset` values are resolved and the
/// value is stored through the attribute table, so locked attributes are left alone.
/// Every write that takes effect is also pushed onto `record` when given.
///
/// Returns the canonical name and the resolved value.
#[must_use]
pub fn store_attribute(
    name: &str,
    value: Option<&str>,
    document: Option<&mut Document>,
    record: Option<&mut Vec<AttributeEntry>>,
) -> (String, Option<String>) {
    store_attribute_at(name, value, document, record, None)
}

#[tracing::instrument(level = "trace", skip(document, record))]
pub(crate) fn store_attribute_at(
    name: &str,
    value: Option<&str>,
    mut document: Option<&mut Document>,
    mut record: Option<&mut Vec<AttributeEntry>>,
    location: Option<&Location>,
) -> (String, Option<String>) {
    let (name, negated) = strip_negation(name);
    let mut value = if negated {
        None
    } else {
        value.map(ToString::to_string)
    };
    let name = match sanitize_attribute_name(name).as_str() {
        "numbered" => "sectnums".to_string(),
        "hardbreaks" => "hardbreaks-option".to_string(),
        name => name.to_string(),
    };
    if name == "showtitle" {
        let notitle = if value.is_some() { None } else { Some("") };
        store_attribute_at(
            "notitle",
            notitle,
            document.as_deref_mut(),
            record.as_deref_mut(),
            location,
        );
    }

    let Some(document) = document else {
        if let Some(record) = record {
            record.push(AttributeEntry::new(name.clone(), value.clone()));
        }
        return (name, value);
    };

    if name == "leveloffset" {
        if let Some(offset) = &value {
            match resolve_level_offset(offset, document.attributes().get("leveloffset")) {
                Ok(offset) => value = Some(offset),
                Err(error) => {
                    document.report(location, &error.to_string());
                    return (name, value);
                }
            }
        }
    }

    let locked = document.attributes().is_locked(&name);
    let (name, value) = document
        .attributes_mut()
        .store(&name, value.as_deref(), false);
    if !locked {
        if let Some(record) = record {
            record.push(AttributeEntry::new(name.clone(), value.clone()));
        }
    }
    (name, value)
}

/// `+N` and `-N` are relative to the current offset, anything else is absolute.
fn resolve_level_offset(value: &str, current: Option<&str>) -> Result<String, Error> {
    let invalid = || Error::InvalidLevelOffset(value.to_string());
    let parse = |text: &str| text.trim().parse::<i32>().map_err(|_| invalid());
    let current = current
        .and_then(|current| current.trim().parse::<i32>().ok())
        .unwrap_or_default();

    let offset = if let Some(delta) = value.strip_prefix('+') {
        current.checked_add(parse(delta)?).ok_or_else(invalid)?
    } else if let Some(delta) = value.strip_prefix('-') {
        current.checked_sub(parse(delta)?).ok_or_else(invalid)?
    } else {
        parse(value)?
    };
    Ok(offset.to_string())
}

/// Read the attribute entry at the current line, following value continuations.
///
/// Returns `None`, without moving, when the current line is not an attribute entry.
/// Otherwise the reader is left on the line after the entry.
pub(crate) fn read_attribute_entry<L: AsRef<str>>(
    reader: &mut LineReader<'_, L>,
) -> Option<(String, String)> {
    let (name, value) = attribute_entry::entry(reader.peek()?).ok()?;
    let mut value = value.unwrap_or_default().to_string();
    reader.advance();

    let Some(marker) = CONTINUATIONS
        .into_iter()
        .find(|marker| value.ends_with(marker))
    else {
        return Some((name.to_string(), value));
    };

    value = strip_marker(&value, marker).to_string();
    while let Some(next) = reader.peek() {
        if next.is_empty() {
            break;
        }
        reader.advance();
        let next = next.trim_start();
        let keep_open = next.ends_with(marker);
        let next = if keep_open {
            strip_marker(next, marker)
        } else {
            next
        };
        let separator = if value.ends_with(HARD_LINE_BREAK) {
            '\n'
        } else {
            ' '
        };
        value.push(separator);
        value.push_str(next);
        if !keep_open {
            break;
        }
    }
    Some((name.to_string(), value))
}

fn strip_marker<'a>(text: &'a str, marker: &str) -> &'a str {
    text.strip_suffix(marker).unwrap_or(text).trim_end()
}

/// Skip comments and consume attribute entries until some other line shows up.
///
/// With a document the entries are stored; without one they are only consumed.
pub(crate) fn process_attribute_entries<L: AsRef<str>>(
    reader: &mut LineReader<'_, L>,
    mut document: Option<&mut Document>,
) {
    reader.skip_comment_lines();
    loop {
        let line_number = reader.line_number();
        let Some((name, value)) = read_attribute_entry(reader) else {
            break;
        };
        tracing::debug!(%name, %value, line = line_number, "found attribute entry");
        if let Some(document) = document.as_deref_mut() {
            let location = document.location(line_number);
            store_attribute_at(&name, Some(&value), Some(document), None, Some(&location));
        }
        reader.skip_comment_lines();
    }
}
