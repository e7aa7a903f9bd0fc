//! In-memory gateway for testing, development, and demo mode.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult, StorageError, StorageResult};
use crate::traits::{AuthProvider, RecordStore};
use crate::types::{Collection, Record, Session};

/// In-memory record store and auth provider.
///
/// Backs the unconfigured demo mode (empty lists, no credentials) and the
/// test suite. Data is lost on restart; insertion order within a premium
/// group is preserved on list.
pub struct MemoryGateway {
    collections: RwLock<HashMap<Collection, Vec<Record>>>,
    credential: Option<(String, String)>,
    session: RwLock<Option<Session>>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    /// Create an empty gateway with no sign-in credential.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            credential: None,
            session: RwLock::new(None),
        }
    }

    /// Accept the given email/password on sign-in.
    pub fn with_credential(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.credential = Some((email.into(), password.into()));
        self
    }

    /// Seed a record, keeping whatever flags it carries.
    pub fn seed(&self, record: Record) {
        let collection = record.collection();
        self.collections
            .write()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(record);
    }

    /// Number of records in a collection.
    pub fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .unwrap()
            .get(&collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Remove all records from all collections.
    pub fn clear(&self) {
        self.collections.write().unwrap().clear();
    }
}

#[async_trait]
impl AuthProvider for MemoryGateway {
    async fn session(&self) -> Option<Session> {
        self.session.read().unwrap().clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        match &self.credential {
            None => Err(AuthError::Unconfigured),
            Some((e, p)) if e == email && p == password => {
                let session = Session {
                    user_id: Uuid::new_v4().to_string(),
                    email: Some(email.to_string()),
                };
                *self.session.write().unwrap() = Some(session.clone());
                Ok(session)
            }
            Some(_) => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_out(&self) {
        *self.session.write().unwrap() = None;
    }
}

#[async_trait]
impl RecordStore for MemoryGateway {
    async fn list(&self, collection: Collection) -> Vec<Record> {
        let mut records = self
            .collections
            .read()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default();
        // Stable: insertion order preserved within each premium group.
        records.sort_by_key(|r| !r.is_premium());
        records
    }

    async fn insert(
        &self,
        collection: Collection,
        mut fields: serde_json::Map<String, serde_json::Value>,
    ) -> StorageResult<Record> {
        fields.insert(
            "id".to_string(),
            serde_json::Value::String(Uuid::new_v4().to_string()),
        );
        fields.insert("is_premium".to_string(), serde_json::Value::Bool(false));
        fields.insert(
            "created_at".to_string(),
            serde_json::to_value(Utc::now()).map_err(StorageError::from)?,
        );

        let record = collection.decode(serde_json::Value::Object(fields))?;
        self.collections
            .write()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn delete(&self, collection: Collection, id: &str) -> StorageResult<()> {
        let mut collections = self.collections.write().unwrap();
        if let Some(records) = collections.get_mut(&collection) {
            records.retain(|r| r.id() != id);
        }
        // Missing id is still a success: the goal state holds.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Job, MarketItem};
    use serde_json::json;

    fn market(id: &str, title: &str, premium: bool) -> Record {
        Record::Market(MarketItem {
            id: id.into(),
            title: title.into(),
            category: "Serviços".into(),
            price: None,
            whatsapp: String::new(),
            description: String::new(),
            is_premium: premium,
            clicks: 0,
            created_at: None,
        })
    }

    #[tokio::test]
    async fn list_orders_premium_first() {
        let gateway = MemoryGateway::new();
        gateway.seed(market("a", "Tradução", false));
        gateway.seed(market("b", "Limpeza", true));
        gateway.seed(market("c", "Babá", false));
        gateway.seed(market("d", "Mudanças", true));

        let ids: Vec<_> = gateway
            .list(Collection::MarketItems)
            .await
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        // Premium first, insertion order stable within each group.
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[tokio::test]
    async fn list_unseeded_collection_is_empty() {
        let gateway = MemoryGateway::new();
        assert!(gateway.list(Collection::Places).await.is_empty());
    }

    #[tokio::test]
    async fn insert_assigns_id_and_forces_non_premium() {
        let gateway = MemoryGateway::new();
        let fields = json!({
            "title": "Garçom",
            "company": "Bistro X",
            "is_premium": true
        });
        let record = gateway
            .insert(Collection::Jobs, fields.as_object().unwrap().clone())
            .await
            .unwrap();

        assert!(!record.id().is_empty());
        assert!(!record.is_premium());
        let job: Job = record.into_job().unwrap();
        assert_eq!(job.title, "Garçom");
        assert_eq!(job.company, "Bistro X");
        assert!(job.created_at.is_some());

        let listed = gateway.list(Collection::Jobs).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].display_title(), "Garçom");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let gateway = MemoryGateway::new();
        gateway.seed(market("a", "Limpeza", false));

        gateway.delete(Collection::MarketItems, "a").await.unwrap();
        assert_eq!(gateway.count(Collection::MarketItems), 0);

        // Second delete of the same id still succeeds.
        gateway.delete(Collection::MarketItems, "a").await.unwrap();
        // So does deleting from a collection that never had the id.
        gateway.delete(Collection::Jobs, "a").await.unwrap();
    }

    #[tokio::test]
    async fn sign_in_round_trip() {
        let gateway = MemoryGateway::new().with_credential("admin@example.com", "s3cret");
        assert!(gateway.session().await.is_none());

        let err = gateway.sign_in("admin@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(gateway.session().await.is_none());

        let session = gateway.sign_in("admin@example.com", "s3cret").await.unwrap();
        assert_eq!(session.email.as_deref(), Some("admin@example.com"));
        assert_eq!(gateway.session().await, Some(session));

        gateway.sign_out().await;
        assert!(gateway.session().await.is_none());
        // Sign-out is idempotent.
        gateway.sign_out().await;
    }

    #[tokio::test]
    async fn sign_in_without_credential_is_unconfigured() {
        let gateway = MemoryGateway::new();
        let err = gateway.sign_in("a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Unconfigured));
    }
}
