//! Data gateway for the community directory.
//!
//! Wraps the hosted backend (PostgREST data API + GoTrue auth) behind two
//! small async traits so the application never talks HTTP directly:
//!
//! - [`RecordStore`] — list/insert/delete over the three record collections
//!   (`market_items`, `jobs`, `places`), always ordered premium-first.
//! - [`AuthProvider`] — credential sign-in, session retrieval, sign-out.
//!
//! Two implementations ship with the crate:
//!
//! - [`SupabaseGateway`] — the production client, built from
//!   [`GatewayConfig::from_env`].
//! - [`MemoryGateway`] — in-memory store for tests and for the unconfigured
//!   demo mode (missing storage credentials must degrade to empty lists,
//!   never crash).
//!
//! List failures of any kind degrade to an empty vector with a `warn` log;
//! callers treat "no backend" as a valid operating mode.

pub mod error;
pub mod memory;
pub mod supabase;
pub mod traits;
pub mod types;

pub use error::{AuthError, StorageError};
pub use memory::MemoryGateway;
pub use supabase::{GatewayConfig, SupabaseGateway};
pub use traits::{AuthProvider, Gateway, RecordStore};
pub use types::{Collection, Job, MarketItem, Place, Record, RecordKind, Session};
