use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An `AttributeName` represents the name of an attribute in a document.
pub type AttributeName = String;

/// Word characters as attribute names and author names understand them: letters,
/// digits (any script) and `_`.
#[must_use]
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// An `AttributeValue` represents the value of an attribute in a document.
///
/// An attribute value is either a string or the explicit unset marker left behind by
/// `:name!:` / `:!name:` entries (and by host configuration that forbids an attribute).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A string attribute value. Boolean attributes are set to the empty string.
    String(String),
    /// The attribute is explicitly unset.
    Unset,
}

impl AttributeValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(value) => Some(value),
            AttributeValue::Unset => None,
        }
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, AttributeValue::Unset)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<Option<String>> for AttributeValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(AttributeValue::Unset, AttributeValue::String)
    }
}

impl From<Option<&str>> for AttributeValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(AttributeValue::Unset, AttributeValue::from)
    }
}

/// `true` sets the attribute to the empty string, `false` unsets it.
impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        if value {
            AttributeValue::String(String::new())
        } else {
            AttributeValue::Unset
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::String(value) => write!(f, "{value}"),
            AttributeValue::Unset => write!(f, "null"),
        }
    }
}

/// The attributes of a block or inline element: the positional attributes from an
/// attribute list (`[source,ruby]` gives positions 1 and 2) and the named ones
/// (`id`, `role`, `<name>-option`, `style`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementAttributes {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    positional: BTreeMap<usize, Option<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    named: BTreeMap<AttributeName, String>,
}

impl ElementAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to set a positional attribute.
    #[must_use]
    pub fn with_positional(mut self, index: usize, value: Option<&str>) -> Self {
        self.set_positional(index, value.map(ToString::to_string));
        self
    }

    /// Builder-style helper to set a named attribute.
    #[must_use]
    pub fn with_named(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn set_positional(&mut self, index: usize, value: Option<String>) {
        self.positional.insert(index, value);
    }

    /// The value at `index`, `None` if missing or present without a value.
    #[must_use]
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(&index).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn has_positional(&self, index: usize) -> bool {
        self.positional.contains_key(&index)
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.named.insert(name.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.named.remove(name)
    }

    /// Named attributes, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeName, &String)> {
        self.named.iter()
    }

    /// Names of the `<name>-option` flags that are set, in name order.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.named
            .keys()
            .filter_map(|name| name.strip_suffix("-option"))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}
