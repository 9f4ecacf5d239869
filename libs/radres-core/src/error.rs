//! Error types for radres-core.

use thiserror::Error;

/// Result type alias using DocumentError.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors raised when reading typed values out of a parsed document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("missing section: {0}")]
    MissingSection(String),

    #[error("record {index} in {section} is missing field {field}")]
    MissingField {
        section: String,
        index: usize,
        field: String,
    },
}
