//! `AsciiDoc` document header and attribute resolution.
//!
//! This crate turns the top-of-document lines of an `AsciiDoc` source (author line,
//! revision line, attribute entries and comments) into a [`HeaderMetadata`] record,
//! and provides what the block parser needs around it: the per-document attribute
//! table with its lock rules, attribute reference substitution, block style
//! shorthand decomposition, verbatim indentation normalization and the anchor id
//! registry.
//!
//! # Example
//!
//! ```
//! use acdc_header::{Document, Options};
//!
//! let options = Options::builder().with_attribute("toc", "left").build();
//! let mut document = Document::new(&options);
//! let lines = [
//!     "Doc Writer <doc@example.org>",
//!     "v1.0, 2024-01-01: First draft",
//!     ":toc: right",
//!     "",
//!     "The body starts here.",
//! ];
//! let (metadata, body) = document.parse_header(&lines);
//!
//! assert_eq!(metadata.text("author"), Some("Doc Writer"));
//! assert_eq!(metadata.text("revnumber"), Some("1.0"));
//! assert_eq!(document.attributes().get("toc"), Some("left"));
//! assert_eq!(body, &["The body starts here."]);
//! ```
mod anchor;
mod document;
mod error;
mod header;
mod indent;
mod logger;
mod model;
mod options;
mod renderer;
mod style;

#[cfg(test)]
mod proptests;

pub use anchor::{AnchorKind, AnchorRegistry};
pub use document::Document;
pub use error::Error;
pub use header::{
    author::{PartitionMode, author_metadata, process_authors, split_author_line},
    parse_header_metadata,
    revision::{RevisionLine, parse_revision_line},
    sanitize_attribute_name, store_attribute,
};
pub use indent::{Indent, IndentOptions, adjust_indentation};
pub use logger::{Logger, MemoryLogger, TracingLogger};
pub use model::{
    ATTRIBUTE_VALUE, AttributeEntry, AttributeName, AttributeValue, Author, AuthorName,
    DEFAULT_SOURCE, DocumentAttributes, ElementAttributes, HEADER, HeaderMetadata, Location,
    MetadataValue, Substitute, Substitution,
};
pub use options::{HostAttribute, Options, OptionsBuilder};
pub use renderer::{InlineRenderer, VerbatimRenderer};
pub use style::parse_style_attribute;
