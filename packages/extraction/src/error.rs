//! Typed errors for the extraction adapter.

use thiserror::Error;

/// Errors that can occur while extracting a listing.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No service credential configured; the adapter never got built.
    #[error("extraction service credential missing")]
    MissingCredential,

    /// HTTP transport failure.
    #[error("extraction request failed: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("extraction service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The service returned no candidates / no text part.
    #[error("extraction service returned an empty response")]
    EmptyResponse,

    /// The returned payload was not valid JSON.
    #[error("malformed extraction payload: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Valid JSON that violates the response contract.
    #[error("extraction response violates schema: {reason}")]
    SchemaViolation { reason: String },
}

impl ExtractError {
    pub(crate) fn schema(reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            reason: reason.into(),
        }
    }
}

/// Result alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
