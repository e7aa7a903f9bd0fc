//! Gateway traits.
//!
//! The boundary is split into two focused traits so tests can exercise
//! storage without auth and vice versa; [`Gateway`] is the composite the
//! application holds.

use async_trait::async_trait;

use crate::error::{AuthResult, StorageResult};
use crate::types::{Collection, Record, Session};

/// Credential-based session management.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The currently authenticated session, if any. No side effects.
    async fn session(&self) -> Option<Session>;

    /// Exchange credentials for a session.
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// Invalidate the current session. Idempotent; subsequent calls to
    /// [`AuthProvider::session`] return `None`.
    async fn sign_out(&self);
}

/// Read/write access to the record collections.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record in the collection, premium-flagged records first.
    ///
    /// Infallible by contract: any failure — unconfigured backend included —
    /// degrades to an empty vector. "No backend" is a valid demo mode, not
    /// an error.
    async fn list(&self, collection: Collection) -> Vec<Record>;

    /// Insert a new record built from the given fields.
    ///
    /// The premium flag is forced to `false` regardless of input; the
    /// storage layer assigns the identifier. Returns the stored record.
    async fn insert(
        &self,
        collection: Collection,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> StorageResult<Record>;

    /// Remove a record by identifier. Idempotent on "not found".
    async fn delete(&self, collection: Collection, id: &str) -> StorageResult<()>;
}

/// Composite gateway trait.
pub trait Gateway: AuthProvider + RecordStore {}

// Blanket implementation: anything implementing both traits is a Gateway.
impl<T: AuthProvider + RecordStore> Gateway for T {}
