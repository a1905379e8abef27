use serde::{Deserialize, Serialize};

/// Name used for the source of documents that were not read from a file.
pub const DEFAULT_SOURCE: &str = "<stdin>";

/// A `Location` represents the position of a line in a document source.
///
/// This is purely for diagnostics. It displays as `<source>: line <N>`, which is the
/// prefix of every warning emitted through a [`crate::Logger`].
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Location {
    /// The source identifier (file path, or `<stdin>`).
    pub source: String,
    /// The line number (1-indexed).
    pub line: usize,
}

impl Location {
    #[must_use]
    pub fn new(source: impl Into<String>, line: usize) -> Self {
        Self {
            source: source.into(),
            line,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, 1)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: line {}", self.source, self.line)
    }
}
