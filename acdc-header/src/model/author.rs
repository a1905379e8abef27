use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// An `Author` represents the author of a document, split into name parts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Author {
    /// The full name, as written to the `author` attribute.
    #[serde(rename = "author")]
    pub name: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "middlename"
    )]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "lastname")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Author {
    /// Build an author from its name parts. `name` is the parts joined by a space.
    #[must_use]
    pub fn new(first_name: &str, middle_name: Option<&str>, last_name: Option<&str>) -> Self {
        let mut name = first_name.to_string();
        for part in [middle_name, last_name].into_iter().flatten() {
            name.push(' ');
            name.push_str(part);
        }
        Self {
            name,
            first_name: first_name.to_string(),
            middle_name: middle_name.map(ToString::to_string),
            last_name: last_name.map(ToString::to_string),
            email: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: Option<&str>) -> Self {
        self.email = email.map(ToString::to_string);
        self
    }

    /// Replace the full name while keeping the parts.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// First grapheme of each present name part.
    #[must_use]
    pub fn initials(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            self.last_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter_map(first_grapheme)
        .collect()
    }
}

fn first_grapheme(text: &str) -> Option<&str> {
    text.graphemes(true).next()
}

/// The result of partitioning one author entry.
///
/// `Unstructured` keeps entries that did not fit the name rules: the whole text is
/// used as both the name and the first name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorName {
    Structured(Author),
    Unstructured(String),
}

impl AuthorName {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            AuthorName::Structured(author) => &author.name,
            AuthorName::Unstructured(text) => text,
        }
    }

    #[must_use]
    pub fn initials(&self) -> String {
        match self {
            AuthorName::Structured(author) => author.initials(),
            AuthorName::Unstructured(text) => first_grapheme(text).unwrap_or_default().to_string(),
        }
    }

    /// The present metadata fields of this author: `author`, `authorinitials`,
    /// `firstname`, then `middlename`, `lastname` and `email` when known.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("author", self.name().to_string()),
            ("authorinitials", self.initials()),
        ];
        match self {
            AuthorName::Structured(author) => {
                fields.push(("firstname", author.first_name.clone()));
                if let Some(middle_name) = &author.middle_name {
                    fields.push(("middlename", middle_name.clone()));
                }
                if let Some(last_name) = &author.last_name {
                    fields.push(("lastname", last_name.clone()));
                }
                if let Some(email) = &author.email {
                    fields.push(("email", email.clone()));
                }
            }
            AuthorName::Unstructured(text) => fields.push(("firstname", text.clone())),
        }
        fields
    }
}
