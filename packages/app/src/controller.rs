//! Async command handlers over the gateway and the extraction adapter.

use std::sync::Arc;

use extraction::{extract_opt, Category, Extractor};
use gateway::{AuthError, Collection, Gateway, Record, Session, StorageError};
use tracing::{info, warn};

use crate::state::AppState;

/// How many records the admin "recently added" list shows.
const RECENT_LIMIT: usize = 5;

/// Outcome of the admin AI-publish flow.
///
/// Not an error type: every variant maps to a user-facing notice and the UI
/// keeps running either way.
#[derive(Debug)]
pub enum PublishOutcome {
    /// Record stored and collections reloaded.
    Published(Record),
    /// Extraction unavailable or failed; shown as a generic notice.
    ExtractionFailed,
    /// Storage rejected the insert; message surfaced to the admin.
    StorageFailed(String),
}

/// Owns the application state and the two remote boundaries.
///
/// Every command handler takes `&mut self`, so actions are serialized by
/// construction: a submission cannot re-enter while another is in flight.
pub struct AppController {
    gateway: Arc<dyn Gateway>,
    extractor: Option<Arc<dyn Extractor>>,
    pub state: AppState,
}

impl AppController {
    pub fn new(gateway: Arc<dyn Gateway>, extractor: Option<Arc<dyn Extractor>>) -> Self {
        Self {
            gateway,
            extractor,
            state: AppState::new(),
        }
    }

    /// Whether the admin AI-publish feature is available.
    pub fn extraction_enabled(&self) -> bool {
        self.extractor.is_some()
    }

    /// Startup: restore an existing session, then load all collections.
    pub async fn init(&mut self) {
        self.state.session = self.gateway.session().await;
        self.load_all().await;
    }

    /// Fetch the three collections in parallel.
    ///
    /// Each fetch degrades to empty on failure inside the gateway, so a
    /// broken collection never blocks the other two.
    pub async fn load_all(&mut self) {
        let (market, jobs, places) = tokio::join!(
            self.gateway.list(Collection::MarketItems),
            self.gateway.list(Collection::Jobs),
            self.gateway.list(Collection::Places),
        );
        self.state.market = market.into_iter().filter_map(Record::into_market).collect();
        self.state.jobs = jobs.into_iter().filter_map(Record::into_job).collect();
        self.state.places = places.into_iter().filter_map(Record::into_place).collect();
        info!(
            market = self.state.market.len(),
            jobs = self.state.jobs.len(),
            places = self.state.places.len(),
            "collections loaded"
        );
    }

    /// Exchange credentials for a session and return to the client view.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        match self.gateway.sign_in(email, password).await {
            Ok(session) => {
                self.state.handle_signed_in(session.clone());
                Ok(session)
            }
            Err(e) => {
                warn!(error = %e, "sign-in failed");
                Err(e)
            }
        }
    }

    /// Invalidate the session and force the client view.
    pub async fn sign_out(&mut self) {
        self.gateway.sign_out().await;
        self.state.handle_signed_out();
    }

    /// Admin publish flow: extract a listing from raw text, insert it into
    /// the matching collection, then reload everything.
    pub async fn publish(&mut self, raw_text: &str) -> PublishOutcome {
        let Some(listing) = extract_opt(self.extractor.as_deref(), raw_text).await else {
            return PublishOutcome::ExtractionFailed;
        };

        let collection = collection_for(listing.category);
        match self.gateway.insert(collection, listing.insert_fields()).await {
            Ok(record) => {
                info!(%collection, id = record.id(), "record published");
                self.load_all().await;
                PublishOutcome::Published(record)
            }
            Err(e) => PublishOutcome::StorageFailed(e.to_string()),
        }
    }

    /// Admin delete: routes on the record's known kind, then reloads.
    pub async fn delete_record(&mut self, record: &Record) -> Result<(), StorageError> {
        self.gateway.delete(record.collection(), record.id()).await?;
        self.load_all().await;
        Ok(())
    }

    /// The most recently loaded records across all collections, for the
    /// admin "recently added" list.
    pub fn recent_records(&self) -> Vec<Record> {
        self.state
            .market
            .iter()
            .cloned()
            .map(Record::Market)
            .chain(self.state.jobs.iter().cloned().map(Record::Job))
            .chain(self.state.places.iter().cloned().map(Record::Place))
            .take(RECENT_LIMIT)
            .collect()
    }
}

/// Storage collection for an extraction category.
fn collection_for(category: Category) -> Collection {
    match category {
        Category::Market => Collection::MarketItems,
        Category::Job => Collection::Jobs,
        Category::Place => Collection::Places,
    }
}
