//! Gemini implementation of the [`Extractor`] trait.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};
use crate::prompts::{format_extract_prompt, response_schema, SYSTEM_INSTRUCTION};
use crate::types::{parse_response, ExtractedListing};
use crate::Extractor;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Extractor backed by the Google Generative Language API.
#[derive(Clone)]
pub struct GeminiExtractor {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl GeminiExtractor {
    /// Create a new extractor with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into().into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    ///
    /// Fails with [`ExtractError::MissingCredential`] when the variable is
    /// absent or empty; callers that treat the feature as optional can
    /// `.ok()` the result and disable AI publishing instead.
    pub fn from_env() -> Result<Self> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .map(Self::new)
            .ok_or(ExtractError::MissingCredential)
    }

    /// Override the model (default: `gemini-3-flash-preview`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the base URL (for proxies and test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, raw_text: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format_extract_prompt(raw_text),
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Http(e.to_string()))?;
        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(ExtractError::EmptyResponse)
    }
}

#[async_trait]
impl Extractor for GeminiExtractor {
    async fn extract(&self, raw_text: &str) -> Result<ExtractedListing> {
        let payload = self.generate(raw_text).await?;
        parse_response(&payload)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}
