//! Mock extractor for testing application flows without network calls.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::error::{ExtractError, Result};
use crate::types::{Category, ExtractedListing};
use crate::Extractor;

/// Deterministic extractor with queued responses and call recording.
///
/// Responses are consumed in order; once the queue is empty the mock fails
/// with [`ExtractError::EmptyResponse`]. Clones share the same queue and
/// call log.
#[derive(Clone, Default)]
pub struct MockExtractor {
    responses: Arc<RwLock<VecDeque<Result<ExtractedListing>>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful listing.
    pub fn with_listing(self, category: Category, fields: &[(&str, &str)]) -> Self {
        let fields: IndexMap<String, String> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.responses
            .write()
            .unwrap()
            .push_back(Ok(ExtractedListing { category, fields }));
        self
    }

    /// Queue a failure.
    pub fn with_failure(self, error: ExtractError) -> Self {
        self.responses.write().unwrap().push_back(Err(error));
        self
    }

    /// Raw texts the mock was called with, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of extraction calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, raw_text: &str) -> Result<ExtractedListing> {
        self.calls.write().unwrap().push(raw_text.to_string());
        self.responses
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ExtractError::EmptyResponse))
    }
}
