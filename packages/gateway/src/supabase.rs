//! Supabase-backed gateway (PostgREST data API + GoTrue auth).

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AuthError, AuthResult, StorageError, StorageResult};
use crate::traits::{AuthProvider, RecordStore};
use crate::types::{Collection, Record, Session};

/// Connectivity credentials for the hosted backend.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Public anon key, sent as `apikey` on every request.
    pub anon_key: SecretString,
}

impl GatewayConfig {
    /// Read `SUPABASE_URL` / `SUPABASE_ANON_KEY` from the environment.
    ///
    /// Returns `None` when either is missing or empty — the application
    /// treats that as demo mode, not a startup failure.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SUPABASE_URL").ok().filter(|v| !v.is_empty())?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .ok()
            .filter(|v| !v.is_empty())?;
        Some(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }
}

struct AuthState {
    access_token: SecretString,
    session: Session,
}

/// Gateway implementation over a Supabase project.
///
/// Holds the signed-in session in memory; data requests are authorized with
/// the session token when present, the anon key otherwise.
pub struct SupabaseGateway {
    http: Client,
    config: GatewayConfig,
    auth: RwLock<Option<AuthState>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

impl SupabaseGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            auth: RwLock::new(None),
        }
    }

    fn rest_url(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.config.url, collection.table())
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    /// Bearer token for data requests: session token when signed in,
    /// anon key otherwise.
    fn bearer(&self) -> String {
        let auth = self.auth.read().unwrap();
        match auth.as_ref() {
            Some(state) => state.access_token.expose_secret().to_string(),
            None => self.config.anon_key.expose_secret().to_string(),
        }
    }

    fn apply_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.config.anon_key.expose_secret())
            .bearer_auth(self.bearer())
    }

    async fn fetch_rows(&self, collection: Collection) -> StorageResult<Vec<Record>> {
        let response = self
            .apply_headers(self.http.get(self.rest_url(collection)))
            .query(&[("select", "*"), ("order", "is_premium.desc")])
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Backend(format!("{status}: {body}")));
        }

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        rows.into_iter()
            .map(|row| collection.decode(row).map_err(StorageError::from))
            .collect()
    }
}

#[async_trait]
impl AuthProvider for SupabaseGateway {
    async fn session(&self) -> Option<Session> {
        self.auth.read().unwrap().as_ref().map(|s| s.session.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        let response = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", self.config.anon_key.expose_secret())
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AuthError::InvalidCredentials)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(AuthError::Backend(format!("{status}: {body}")));
            }
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        let session = Session {
            user_id: token.user.id,
            email: token.user.email,
        };
        *self.auth.write().unwrap() = Some(AuthState {
            access_token: token.access_token.into(),
            session: session.clone(),
        });
        Ok(session)
    }

    async fn sign_out(&self) {
        // Best-effort remote revocation; the local session is cleared even
        // when the backend is unreachable.
        let token = {
            let auth = self.auth.read().unwrap();
            auth.as_ref()
                .map(|s| s.access_token.expose_secret().to_string())
        };
        if let Some(token) = token {
            let result = self
                .http
                .post(self.auth_url("logout"))
                .header("apikey", self.config.anon_key.expose_secret())
                .bearer_auth(token)
                .send()
                .await;
            if let Err(e) = result {
                warn!(error = %e, "remote sign-out failed, clearing local session");
            }
        }
        *self.auth.write().unwrap() = None;
    }
}

#[async_trait]
impl RecordStore for SupabaseGateway {
    async fn list(&self, collection: Collection) -> Vec<Record> {
        match self.fetch_rows(collection).await {
            Ok(records) => records,
            Err(e) => {
                warn!(%collection, error = %e, "list failed, returning empty");
                Vec::new()
            }
        }
    }

    async fn insert(
        &self,
        collection: Collection,
        mut fields: serde_json::Map<String, serde_json::Value>,
    ) -> StorageResult<Record> {
        // Admin-created content is never premium by default.
        fields.insert("is_premium".to_string(), serde_json::Value::Bool(false));

        let response = self
            .apply_headers(self.http.post(self.rest_url(collection)))
            .header("Prefer", "return=representation")
            .json(&serde_json::Value::Object(fields))
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = postgrest_message(&body).unwrap_or_else(|| format!("{status}: {body}"));
            return Err(StorageError::Constraint(message));
        }

        let mut rows: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        if rows.is_empty() {
            return Err(StorageError::Backend(
                "insert returned no representation".to_string(),
            ));
        }
        Ok(collection.decode(rows.remove(0))?)
    }

    async fn delete(&self, collection: Collection, id: &str) -> StorageResult<()> {
        let response = self
            .apply_headers(self.http.delete(self.rest_url(collection)))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let status = response.status();
        // Deleting a missing row is a success: the goal state holds.
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        let message = postgrest_message(&body).unwrap_or_else(|| format!("{status}: {body}"));
        Err(StorageError::Constraint(message))
    }
}

/// Pull the human-readable `message` out of a PostgREST error body.
fn postgrest_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}
