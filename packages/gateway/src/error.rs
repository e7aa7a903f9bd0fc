//! Typed errors for the gateway.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Nothing here is
//! fatal: the application maps every variant to a user-facing notice or a
//! default value.

use thiserror::Error;

/// Errors from the auth boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Backend rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No storage backend is configured, so there is nothing to sign in to.
    #[error("storage backend not configured")]
    Unconfigured,

    /// Auth backend unreachable or returned an unexpected response.
    #[error("auth backend error: {0}")]
    Backend(String),
}

/// Errors from record storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage backend is configured.
    #[error("storage backend not configured")]
    Unconfigured,

    /// Backend refused the write (constraint violation, permissions).
    #[error("{0}")]
    Constraint(String),

    /// Backend unreachable or returned an unexpected status.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Row payload did not match the expected record shape.
    #[error("malformed record payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result alias for auth operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;
