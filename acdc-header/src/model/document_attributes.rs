use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{
    Serialize,
    ser::{SerializeMap, Serializer},
};

use crate::model::{ATTRIBUTE_VALUE, AttributeName, AttributeValue, Substitute};

/// One successful, unlocked write to the attribute table.
///
/// The table keeps these in write order so later passes can replay or undo the
/// attribute mutations made by the document body (`value` is `None` for an unset).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AttributeEntry {
    pub name: AttributeName,
    pub value: Option<String>,
}

impl AttributeEntry {
    #[must_use]
    pub fn new(name: impl Into<AttributeName>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Per-document attribute table.
///
/// Names are stored lower-cased. A name may be locked, which happens when the host
/// configures it: locked attributes ignore every write coming from the document body.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DocumentAttributes {
    values: FxHashMap<AttributeName, AttributeValue>,
    locked: FxHashSet<AttributeName>,
    entries: Vec<AttributeEntry>,
}

impl Serialize for DocumentAttributes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Sorted so the output is stable; unset attributes are left out.
        let sorted = self
            .values
            .iter()
            .filter_map(|(name, value)| value.as_str().map(|value| (name, value)))
            .collect::<BTreeMap<_, _>>();
        let mut state = serializer.serialize_map(Some(sorted.len()))?;
        for (key, value) in sorted {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

/// Splits a leading or trailing `!` off an attribute name.
///
/// Returns the remaining name and whether the name was negated.
pub(crate) fn strip_negation(name: &str) -> (&str, bool) {
    if let Some(name) = name.strip_suffix('!') {
        (name, true)
    } else if let Some(name) = name.strip_prefix('!') {
        (name, true)
    } else {
        (name, false)
    }
}

impl DocumentAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an attribute.
    ///
    /// A negated name (`name!` or `!name`) always stores the unset marker, whatever
    /// `value` holds. Attribute references (`{name}`) in `value` are resolved against
    /// this table in a single pass before storing.
    ///
    /// When the canonical name is locked nothing changes and no entry is logged, but
    /// the name and the resolved value are still returned so the caller can report
    /// what was attempted.
    pub fn store(
        &mut self,
        name: &str,
        value: Option<&str>,
        locked: bool,
    ) -> (AttributeName, Option<String>) {
        let (name, negated) = strip_negation(name);
        let name = name.to_lowercase();
        let value = if negated {
            None
        } else {
            value.map(|value| value.substitute(ATTRIBUTE_VALUE, self))
        };

        if self.is_locked(&name) {
            tracing::trace!(%name, ?value, "attribute is locked, ignoring write");
            return (name, value);
        }

        self.values
            .insert(name.clone(), AttributeValue::from(value.clone()));
        if locked {
            self.locked.insert(name.clone());
        } else {
            self.locked.remove(&name);
        }
        self.entries
            .push(AttributeEntry::new(name.clone(), value.clone()));
        (name, value)
    }

    /// Unset an attribute. Returns `false` if the attribute is locked.
    pub fn unset(&mut self, name: &str) -> bool {
        let name = name.to_lowercase();
        if self.is_locked(&name) {
            return false;
        }
        self.store(&name, None, false);
        true
    }

    /// Seed an attribute without substitution and without logging an entry.
    ///
    /// This is how host configuration lands in the table when a document is created.
    pub(crate) fn seed(&mut self, name: &str, value: AttributeValue, locked: bool) {
        let name = name.to_lowercase();
        if locked {
            self.locked.insert(name.clone());
        }
        self.values.insert(name, value);
    }

    /// Write a value computed by the header parser, unless the attribute already has
    /// a value or is locked. Returns whether the value was written.
    pub(crate) fn insert_if_absent(&mut self, name: &str, value: String) -> bool {
        if self.get(name).is_some() || self.is_locked(name) {
            return false;
        }
        self.values
            .insert(name.to_string(), AttributeValue::String(value));
        true
    }

    /// Overwrite a value computed by the header parser, unless the attribute is
    /// locked. Returns whether the value was written.
    pub(crate) fn overwrite(&mut self, name: &str, value: String) -> bool {
        if self.is_locked(name) {
            tracing::trace!(%name, "attribute is locked, keeping configured value");
            return false;
        }
        self.values
            .insert(name.to_string(), AttributeValue::String(value));
        true
    }

    /// Look an attribute up, case-insensitively.
    ///
    /// Returns `None` for attributes that were never set and for unset ones.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .or_else(|| self.values.get(&name.to_lowercase()))
            .and_then(AttributeValue::as_str)
    }

    /// Alias of [`DocumentAttributes::resolve`].
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.resolve(name)
    }

    /// The raw value, which tells an unset attribute apart from a missing one.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(&name.to_lowercase())
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    #[must_use]
    pub fn is_locked(&self, name: &str) -> bool {
        self.locked.contains(name) || self.locked.contains(&name.to_lowercase())
    }

    /// Every successful unlocked store, in write order.
    #[must_use]
    pub fn entries(&self) -> &[AttributeEntry] {
        &self.entries
    }

    /// Attributes that currently hold a value, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeName, &str)> {
        self.values
            .iter()
            .filter_map(|(name, value)| value.as_str().map(|value| (name, value)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_store_and_resolve() {
        let mut attributes = DocumentAttributes::new();
        let (name, value) = attributes.store("Foo", Some("bar"), false);
        assert_eq!(name, "foo");
        assert_eq!(value.as_deref(), Some("bar"));
        assert_eq!(attributes.resolve("foo"), Some("bar"));
        assert_eq!(attributes.resolve("FOO"), Some("bar"));
        assert_eq!(
            attributes.entries(),
            &[AttributeEntry::new("foo", Some("bar".into()))]
        );
    }

    #[test]
    fn test_store_negated_name_unsets() {
        for name in ["foo!", "!foo"] {
            let mut attributes = DocumentAttributes::new();
            attributes.store("foo", Some("baz"), false);
            let (name, value) = attributes.store(name, Some("ignored"), false);
            assert_eq!(name, "foo");
            assert_eq!(value, None);
            assert_eq!(attributes.resolve("foo"), None);
            assert_eq!(attributes.value("foo"), Some(&AttributeValue::Unset));
            assert_eq!(attributes.entries().len(), 2);
        }
    }

    #[test]
    fn test_store_into_locked_attribute_is_ignored() {
        let mut attributes = DocumentAttributes::new();
        attributes.seed("foo", AttributeValue::from("baz"), true);
        let (name, value) = attributes.store("foo", Some("bar"), false);
        assert_eq!(name, "foo");
        assert_eq!(value.as_deref(), Some("bar"));
        assert_eq!(attributes.resolve("foo"), Some("baz"));
        assert!(attributes.entries().is_empty());
        assert!(!attributes.unset("foo"));
    }

    #[test]
    fn test_store_resolves_references_once() {
        let mut attributes = DocumentAttributes::new();
        attributes.store("b", Some("inner"), false);
        attributes.store("a", Some("{b}"), false);
        assert_eq!(attributes.resolve("a"), Some("inner"));

        let mut attributes = DocumentAttributes::new();
        attributes.seed("a", AttributeValue::from("{b}"), false);
        attributes.seed("b", AttributeValue::from("deep"), false);
        let (_, value) = attributes.store("c", Some("{a}"), false);
        assert_eq!(value.as_deref(), Some("{b}"));
    }

    #[test]
    fn test_store_with_lock_relocks() {
        let mut attributes = DocumentAttributes::new();
        attributes.store("foo", Some("one"), true);
        assert!(attributes.is_locked("foo"));
        attributes.store("foo", Some("two"), false);
        assert_eq!(attributes.resolve("foo"), Some("one"));
    }

    #[test]
    fn test_insert_if_absent() {
        let mut attributes = DocumentAttributes::new();
        assert!(attributes.insert_if_absent("author", "Doc Writer".into()));
        assert!(!attributes.insert_if_absent("author", "Someone Else".into()));
        assert_eq!(attributes.resolve("author"), Some("Doc Writer"));
        assert!(attributes.entries().is_empty());
    }

    #[test]
    fn test_serialize_sorted_without_unset() -> Result<(), serde_json::Error> {
        let mut attributes = DocumentAttributes::new();
        attributes.store("zeta", Some("z"), false);
        attributes.store("alpha", Some("a"), false);
        attributes.store("gone!", None, false);
        assert_eq!(
            serde_json::to_string(&attributes)?,
            r#"{"alpha":"a","zeta":"z"}"#
        );
        Ok(())
    }
}
