//! Error types for the issuer.

use dataitem_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors that can occur while issuing items.
#[derive(Debug, Error)]
pub enum IssuerError {
    /// Assembly, parsing or signing failed.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A freshly signed item did not verify.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Payload exceeds the configured limit.
    #[error("payload of {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },
}

/// Result type for issuer operations.
pub type Result<T> = std::result::Result<T, IssuerError>;
