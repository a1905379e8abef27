#[non_exhaustive]
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid indent: {0}")]
    InvalidIndent(String),

    #[error("Invalid tab size: {0}")]
    InvalidTabSize(String),

    #[error("Invalid level offset: {0}")]
    InvalidLevelOffset(String),
}

impl Error {
    /// Get advice for this error if available.
    /// Returns helpful information for resolving the error.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::InvalidIndent(..) => {
                "The indent attribute must be a whole number of columns, or -1 to keep the original indentation"
            }
            Self::InvalidTabSize(..) => {
                "The tabsize attribute must be a whole number of columns (0 leaves tabs untouched)"
            }
            Self::InvalidLevelOffset(..) => {
                "leveloffset accepts an absolute level (e.g. 1) or a relative one (e.g. +1, -1)"
            }
        }
    }
}
