//! Decomposition of the block style shorthand.
//!
//! The first positional attribute of a block can carry, besides the style itself, the
//! id, roles and options of the block:
//!
//! ```text
//! [quote#roads.prologue%collapsible]
//! ```
//!
//! `#` introduces the id, `.` a role and `%` an option. Each shorthand entry is placed
//! directly adjacent to the previous one, starting immediately after the optional
//! style. The order of the entries does not matter, except for the style, which must
//! come first.
use crate::ElementAttributes;

#[derive(Debug, PartialEq)]
pub(crate) enum Shorthand<'a> {
    Id(&'a str),
    Role(&'a str),
    Option(&'a str),
}

impl Shorthand<'_> {
    fn empty_warning(&self) -> &'static str {
        match self {
            Shorthand::Id(_) => EMPTY_ID,
            Shorthand::Role(_) => EMPTY_ROLE,
            Shorthand::Option(_) => EMPTY_OPTION,
        }
    }

    fn value(&self) -> &str {
        match self {
            Shorthand::Id(value) | Shorthand::Role(value) | Shorthand::Option(value) => value,
        }
    }
}

peg::parser! {
    grammar shorthand() for str {
        pub(crate) rule style() -> (&'input str, Vec<Shorthand<'input>>)
            = style:value() shorthands:shorthand()* ![_] { (style, shorthands) }

        rule shorthand() -> Shorthand<'input>
            = "#" id:value() { Shorthand::Id(id) }
            / "." role:value() { Shorthand::Role(role) }
            / "%" option:value() { Shorthand::Option(option) }

        rule value() -> &'input str = $([^ '#' | '.' | '%']*)
    }
}

pub(crate) const EMPTY_ID: &str = "invalid empty id detected in style attribute";
pub(crate) const EMPTY_ROLE: &str = "invalid empty role detected in style attribute";
pub(crate) const EMPTY_OPTION: &str = "invalid empty option detected in style attribute";
pub(crate) const MULTIPLE_IDS: &str = "multiple ids detected in style attribute";

/// Decompose the shorthand in positional attribute 1 into `style`, `id`, `role` and
/// `<name>-option` attributes, returning the style.
///
/// Warnings about malformed shorthand are sent to `tracing`. Use
/// [`crate::Document::parse_style_attribute`] to have them reported with a location.
pub fn parse_style_attribute(attributes: &mut ElementAttributes) -> Option<String> {
    parse_style_attribute_with(attributes, |message| {
        tracing::warn!("{message}");
    })
}

#[tracing::instrument(level = "trace", skip(warn))]
pub(crate) fn parse_style_attribute_with<F>(
    attributes: &mut ElementAttributes,
    mut warn: F,
) -> Option<String>
where
    F: FnMut(&str),
{
    let raw_style = attributes.positional(1)?.to_string();

    // A space is never part of shorthand.
    let parsed = if raw_style.contains(' ') {
        None
    } else {
        shorthand::style(&raw_style).ok()
    };
    let Some((style, shorthands)) = parsed.filter(|(_, shorthands)| !shorthands.is_empty())
    else {
        attributes.insert("style", &raw_style);
        return Some(raw_style);
    };

    let mut id = None;
    let mut roles = Vec::new();
    let mut options = Vec::new();
    for shorthand in shorthands {
        if shorthand.value().is_empty() {
            warn(shorthand.empty_warning());
            continue;
        }
        match shorthand {
            Shorthand::Id(value) => {
                if id.replace(value).is_some() {
                    warn(MULTIPLE_IDS);
                }
            }
            Shorthand::Role(value) => roles.push(value),
            Shorthand::Option(value) => options.push(value),
        }
    }

    let style = (!style.is_empty()).then(|| style.to_string());
    if let Some(style) = &style {
        attributes.insert("style", style);
    }
    if let Some(id) = id {
        attributes.insert("id", id);
    }
    if !roles.is_empty() {
        attributes.insert("role", &roles.join(" "));
    }
    for option in options {
        attributes.insert(&format!("{option}-option"), "");
    }
    tracing::debug!(?style, "decomposed style shorthand");
    style
}
