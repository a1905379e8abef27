//! Header metadata types for `AsciiDoc` documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single value of the header metadata record.
///
/// Everything is text except `authorcount`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Count(usize),
}

impl MetadataValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(text) => Some(text),
            MetadataValue::Count(_) => None,
        }
    }

    #[must_use]
    pub fn as_count(&self) -> Option<usize> {
        match self {
            MetadataValue::Count(count) => Some(*count),
            MetadataValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataValue::Text(text) => write!(f, "{text}"),
            MetadataValue::Count(count) => write!(f, "{count}"),
        }
    }
}

/// The record built from a document header: author keys (`author`, `firstname_2`,
/// `authorcount`, ...) and revision keys (`revnumber`, `revdate`, `revremark`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderMetadata(BTreeMap<String, MetadataValue>);

impl HeaderMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), MetadataValue::Text(value.into()));
    }

    pub fn insert_count(&mut self, key: impl Into<String>, count: usize) {
        self.0.insert(key.into(), MetadataValue::Count(count));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    /// The text value under `key`, `None` when missing or not text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(MetadataValue::as_text)
    }

    /// The number of authors, when the record carries one.
    #[must_use]
    pub fn author_count(&self) -> Option<usize> {
        self.0.get("authorcount").and_then(MetadataValue::as_count)
    }

    pub fn remove(&mut self, key: &str) -> Option<MetadataValue> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Copy every key of `other` into this record, replacing existing values.
    pub fn merge(&mut self, other: HeaderMetadata) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetadataValue)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
