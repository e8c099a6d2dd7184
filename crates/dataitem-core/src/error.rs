//! Error types for the data item core.

use thiserror::Error;

/// Core errors that can occur while building, parsing or signing items.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("{field} must be {expected} bytes, but was {actual}")]
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("data item is already signed")]
    AlreadySigned,

    #[error("unsupported signature type: {0}")]
    UnsupportedSignatureType(u16),

    #[error("malformed data item: {0}")]
    MalformedItem(String),

    #[error("tag decoding error: {0}")]
    TagDecoding(String),
}

/// Validation errors for signed items.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("data item is not signed")]
    NotSigned,

    #[error("signature verification failed")]
    SignatureFailed,

    #[error("identifier does not match signature")]
    IdMismatch,

    #[error("tag count mismatch: header says {declared}, section holds {actual}")]
    TagCountMismatch { declared: u64, actual: u64 },

    #[error("too many tags: {0} (max 128)")]
    TooManyTags(usize),

    #[error("tag {index} has an empty name or value")]
    EmptyTag { index: usize },

    #[error("tag {index} name is {len} bytes (max 1024)")]
    TagNameTooLong { index: usize, len: usize },

    #[error("tag {index} value is {len} bytes (max 3072)")]
    TagValueTooLong { index: usize, len: usize },

    #[error("structural error: {0}")]
    StructuralError(String),
}

impl From<CoreError> for ValidationError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidKey(_) | CoreError::InvalidSignature | CoreError::Signing(_) => {
                ValidationError::SignatureFailed
            }
            CoreError::AlreadySigned => {
                ValidationError::StructuralError("unexpected signing state".into())
            }
            CoreError::InvalidFieldLength { .. }
            | CoreError::UnsupportedSignatureType(_)
            | CoreError::MalformedItem(_)
            | CoreError::TagDecoding(_) => ValidationError::StructuralError(e.to_string()),
        }
    }
}
