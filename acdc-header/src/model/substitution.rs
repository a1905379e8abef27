use serde::{Deserialize, Serialize};

use crate::model::{DocumentAttributes, is_word_char};

/// A `Substitution` is one step of the substitution pipelines applied to header
/// values before they land in the attribute table.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Substitution {
    SpecialChars,
    Attributes,
}

/// Applied to implicit author and revision values written into the table.
pub const HEADER: &[Substitution] = &[Substitution::SpecialChars, Substitution::Attributes];
/// Applied to the value of an attribute entry.
pub const ATTRIBUTE_VALUE: &[Substitution] = &[Substitution::Attributes];

impl Substitute for &str {}
impl Substitute for String {}

pub trait Substitute: ToString {
    fn substitute(
        &self,
        substitutions: &[Substitution],
        attributes: &DocumentAttributes,
    ) -> String {
        let mut text = self.to_string();
        for substitution in substitutions {
            text = match substitution {
                Substitution::SpecialChars => Self::substitute_special_chars(&text),
                Substitution::Attributes => Self::substitute_attributes(&text, attributes),
            };
        }
        text
    }

    #[must_use]
    fn substitute_special_chars(text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                c => result.push(c),
            }
        }
        result
    }

    /**
    Given a text and a set of attributes, resolve the attribute references in the text.

    The attribute references are in the form of `{name}`, where name starts with a word
    character and continues with word characters or `-`. References to attributes that
    are missing (or unset) stay as they are, and `\{name}` produces a literal `{name}`.

    This is a single pass: a value that itself contains references is inserted as is.
     */
    #[must_use]
    fn substitute_attributes(text: &str, attributes: &DocumentAttributes) -> String {
        let mut result = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            let (before, after) = rest.split_at(open);
            let tail = after.get(1..).unwrap_or_default();
            let Some(name) = reference_name(tail) else {
                result.push_str(before);
                result.push('{');
                rest = tail;
                continue;
            };
            rest = tail.get(name.len() + 1..).unwrap_or_default();

            if let Some(before) = before.strip_suffix('\\') {
                result.push_str(before);
                result.push('{');
                result.push_str(name);
                result.push('}');
                continue;
            }

            result.push_str(before);
            if let Some(value) = attributes.resolve(name) {
                result.push_str(value);
            } else {
                tracing::trace!(%name, "attribute reference not resolved");
                result.push('{');
                result.push_str(name);
                result.push('}');
            }
        }
        result.push_str(rest);
        result
    }
}

/// The attribute name at the start of `tail` if it is followed by the closing brace.
fn reference_name(tail: &str) -> Option<&str> {
    let end = tail.find('}')?;
    let name = tail.get(..end)?;
    let mut chars = name.chars();
    let first = chars.next()?;
    if is_word_char(first) && chars.all(|c| is_word_char(c) || c == '-') {
        Some(name)
    } else {
        None
    }
}
