//! Google Gemini `generateContent` adapter for the suggestion tier.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::suggest::{SuggestError, SuggestionProvider};

const DEFAULT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const API_KEY_HEADER: &str = "x-goog-api-key";

// DEFAULT_BASE is a fixed absolute https URL ending in '/', so parsing cannot fail.
static DEFAULT_BASE_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE).expect("DEFAULT_BASE is a valid absolute URL"));

/// Connection settings for the Gemini API.
///
/// The API key is only ever injected: read from the environment or handed
/// over by the caller.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: Url,
    pub model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Config with default endpoint, model, and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.clone(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Read configuration from the environment.
    ///
    /// Looks for:
    /// - NSSHUB_GEMINI_API_KEY: required
    /// - NSSHUB_GEMINI_BASE_URL: API root, default v1beta endpoint
    /// - NSSHUB_GEMINI_MODEL: default `gemini-1.5-flash`
    /// - NSSHUB_GEMINI_TIMEOUT_MS: HTTP timeout in milliseconds
    pub fn from_env() -> Result<Self> {
        let key_var = "NSSHUB_GEMINI_API_KEY";
        let api_key = std::env::var(key_var)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .with_context(|| format!("{key_var} must be set for AI planning"))?;

        let base_var = "NSSHUB_GEMINI_BASE_URL";
        let base_url = std::env::var(base_var).unwrap_or_else(|_| DEFAULT_BASE.to_string());
        let base_url = parse_base_url(&base_url)
            .with_context(|| format!("invalid {base_var} url: {base_url}"))?;

        let model = std::env::var("NSSHUB_GEMINI_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_ms = match std::env::var("NSSHUB_GEMINI_TIMEOUT_MS") {
            Ok(v) => v.parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %v,
                    default = DEFAULT_TIMEOUT_MS,
                    "Invalid NSSHUB_GEMINI_TIMEOUT_MS value, using default"
                );
                DEFAULT_TIMEOUT_MS
            }),
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> Result<Url> {
        self.base_url
            .join(&format!("models/{}:generateContent", self.model))
            .context("building generateContent url")
    }
}

/// Parse a base URL so relative joins append to its path.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Suggestion provider backed by Gemini.
#[derive(Debug, Clone)]
pub struct GeminiSuggester {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiSuggester {
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { config, client })
    }

    /// Build from environment; fails when no API key is configured.
    pub fn from_env() -> Result<Self> {
        Self::with_config(GeminiConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

fn build_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": { "responseMimeType": "application/json" }
    })
}

#[async_trait]
impl SuggestionProvider for GeminiSuggester {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String, SuggestError> {
        let url = self
            .config
            .endpoint()
            .map_err(|e| SuggestError::Unavailable(e.to_string()))?;
        debug!(model = %self.config.model, "Requesting Gemini plan suggestion");

        let resp = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&build_request_body(prompt))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .and_then(|e| e.get("message"))
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "gemini call failed".to_string());
            return Err(SuggestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| SuggestError::Unavailable(format!("unexpected response body: {e}")))?;

        let joined: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if joined.trim().is_empty() {
            return Err(SuggestError::EmptyResponse);
        }
        Ok(joined)
    }
}
