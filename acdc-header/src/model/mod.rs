//! The data models for `AsciiDoc` document headers and attributes.

mod attributes;
mod author;
mod document_attributes;
mod location;
mod metadata;
mod substitution;

pub(crate) use attributes::is_word_char;
pub(crate) use document_attributes::strip_negation;

pub use attributes::{AttributeName, AttributeValue, ElementAttributes};
pub use author::{Author, AuthorName};
pub use document_attributes::{AttributeEntry, DocumentAttributes};
pub use location::{DEFAULT_SOURCE, Location};
pub use metadata::{HeaderMetadata, MetadataValue};
pub use substitution::{ATTRIBUTE_VALUE, HEADER, Substitute, Substitution};
