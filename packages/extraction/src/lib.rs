//! Structured listing extraction.
//!
//! Takes free-form pasted text (a classified ad, a job offer, a venue tip),
//! sends it to a generative model with a fixed instruction and a strict
//! response schema, and returns a categorized listing ready for insertion
//! into the matching storage collection.
//!
//! The remote service does all classification; this crate only enforces the
//! response contract. The admin flow calls [`extract_opt`], which collapses
//! every failure mode — missing credential, network error, malformed JSON,
//! schema violation — into `None` so nothing ever propagates to the UI.
//!
//! ```rust,ignore
//! use extraction::{extract_opt, GeminiExtractor};
//!
//! let extractor = GeminiExtractor::from_env().ok(); // absent credential disables the feature
//! let extractor = extractor.as_ref().map(|e| e as &dyn Extractor);
//! if let Some(listing) = extract_opt(extractor, raw_text).await {
//!     // route `listing.category` to its storage collection and insert
//!     // `listing.insert_fields()`
//! }
//! ```

pub mod error;
pub mod gemini;
pub mod prompts;
pub mod testing;
pub mod types;

use async_trait::async_trait;

pub use error::{ExtractError, Result};
pub use gemini::GeminiExtractor;
pub use testing::MockExtractor;
pub use types::{
    Category, ExtractedListing, JobFields, ListingFields, MarketFields, PlaceFields,
};

/// A structured-extraction backend.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract a categorized listing from raw text.
    async fn extract(&self, raw_text: &str) -> Result<ExtractedListing>;
}

/// Failure-collapsing adapter for the admin flow: every error becomes `None`.
///
/// `None` for `extractor` means the service credential is absent; the call
/// short-circuits without any network access.
pub async fn extract_opt(
    extractor: Option<&dyn Extractor>,
    raw_text: &str,
) -> Option<ExtractedListing> {
    let extractor = extractor?;
    match extractor.extract(raw_text).await {
        Ok(listing) => Some(listing),
        Err(e) => {
            tracing::warn!(error = %e, "extraction failed");
            None
        }
    }
}
