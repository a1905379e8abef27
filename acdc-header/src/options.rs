use std::collections::BTreeMap;

use crate::{AttributeValue, DEFAULT_SOURCE, model::strip_negation};

/// An attribute configured by the host, before it is seeded into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAttribute {
    pub value: AttributeValue,
    /// Soft-set attributes may be overridden by the document body.
    pub soft: bool,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Options {
    /// Attributes supplied by the host, keyed by lower-cased name.
    pub attributes: BTreeMap<String, HostAttribute>,
    /// Name of the document source, used in warnings.
    pub source: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            attributes: BTreeMap::new(),
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl Options {
    /// Create a new `OptionsBuilder` for fluent configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use acdc_header::Options;
    ///
    /// let options = Options::builder()
    ///     .with_attribute("toc", "left")
    ///     .with_soft_attribute("icons", "font")
    ///     .with_source("index.adoc")
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Create a new `Options` with default settings.
    ///
    /// Equivalent to `Options::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder for `Options` that provides an API for configuration.
///
/// Create an `OptionsBuilder` using `Options::builder()`.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Add a host attribute.
    ///
    /// The attribute is locked: the document body cannot change it. The usual host
    /// conventions apply to the raw name and value:
    /// - a trailing `@` on the name or the value soft-sets the attribute (left unlocked)
    /// - a trailing `!` on the name (or a leading one) unsets it
    /// - `bool` values: `true` sets the attribute to the empty string, `false` unsets it
    ///
    /// # Example
    ///
    /// ```
    /// use acdc_header::Options;
    ///
    /// let options = Options::builder()
    ///     .with_attribute("toc", "left@")
    ///     .with_attribute("sectnums", true)
    ///     .with_attribute("icons!", "")
    ///     .build();
    /// assert!(options.attributes["toc"].soft);
    /// ```
    #[must_use]
    pub fn with_attribute(self, name: &str, value: impl Into<AttributeValue>) -> Self {
        let mut value = value.into();
        let mut soft = false;
        let name = match name.strip_suffix('@') {
            Some(name) => {
                soft = true;
                name
            }
            None => name,
        };
        if let Some(text) = value.as_str().and_then(|text| text.strip_suffix('@')) {
            soft = true;
            value = AttributeValue::from(text);
        }
        let (name, negated) = strip_negation(name);
        if negated {
            value = AttributeValue::Unset;
        }
        self.insert(name, value, soft)
    }

    /// Add a host attribute the document body is allowed to override.
    #[must_use]
    pub fn with_soft_attribute(self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value.into(), true)
    }

    /// Forbid an attribute: it is unset and stays unset.
    #[must_use]
    pub fn with_unset_attribute(self, name: &str) -> Self {
        self.insert(name, AttributeValue::Unset, false)
    }

    /// Add several host attributes at once, with the same rules as
    /// [`OptionsBuilder::with_attribute`].
    #[must_use]
    pub fn with_attributes<I, N, V>(self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<AttributeValue>,
    {
        attributes
            .into_iter()
            .fold(self, |builder, (name, value)| {
                builder.with_attribute(name.as_ref(), value)
            })
    }

    /// Set the name of the document source, as shown in warnings.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.options.source = source.into();
        self
    }

    /// Build the `Options` from this builder.
    #[must_use]
    pub fn build(self) -> Options {
        self.options
    }

    fn insert(mut self, name: &str, value: AttributeValue, soft: bool) -> Self {
        self.options
            .attributes
            .insert(name.to_lowercase(), HostAttribute { value, soft });
        self
    }
}
