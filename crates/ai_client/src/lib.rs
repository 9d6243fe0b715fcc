//! Clients for the language models that write narrative financial advice.
//!
//! Every client implements [`AdviceProvider`], so callers only ever see a
//! prompt going in and text (or a [`ProviderError`]) coming out.

mod error;
mod gemini;
mod huggingface;
mod ollama;

use async_trait::async_trait;
use models::{AiSettings, ProviderKind};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

pub use error::{ProviderError, Result};
pub use gemini::GeminiClient;
pub use huggingface::HuggingFaceClient;
pub use ollama::OllamaClient;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_HUGGINGFACE_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Placeholder shipped in sample `.env` files; treated as "no key".
const PLACEHOLDER_KEY: &str = "your_api_key_here";

/// An external model that turns a prompt into advice text.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn invoke(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct AiClientConfig {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_url: Option<String>,
    pub ollama_base_url: String,
    pub timeout: Duration,
}

impl AiClientConfig {
    /// Combines file/env settings with the API key, which only ever comes
    /// from the environment.
    pub fn from_settings(settings: &AiSettings, api_key: Option<String>) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && k != PLACEHOLDER_KEY);

        Self {
            provider: settings.provider,
            api_key,
            model: settings.model.clone(),
            api_url: settings.api_url.clone(),
            ollama_base_url: settings
                .ollama_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            timeout: Duration::from_secs(settings.timeout_secs.max(1)),
        }
    }
}

/// Builds the configured provider, or `None` when a hosted provider has no
/// usable API key.
pub fn build_provider(config: &AiClientConfig) -> Result<Option<Arc<dyn AdviceProvider>>> {
    let provider: Arc<dyn AdviceProvider> = match config.provider {
        ProviderKind::Gemini => {
            let Some(key) = config.api_key.clone() else {
                return Ok(None);
            };
            let model = config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
            Arc::new(GeminiClient::new(key, model, config.timeout)?)
        }
        ProviderKind::HuggingFace => {
            let Some(key) = config.api_key.clone() else {
                return Ok(None);
            };
            let url = config
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_HUGGINGFACE_URL.to_string());
            Arc::new(HuggingFaceClient::new(key, url, config.timeout)?)
        }
        ProviderKind::Ollama => {
            let model = config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string());
            Arc::new(OllamaClient::new(&config.ollama_base_url, model, config.timeout)?)
        }
    };

    tracing::info!(provider = provider.name(), "AI advice provider configured");
    Ok(Some(provider))
}

pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::InvalidConfig(format!("Failed to build HTTP client: {e}")))
}

/// Sends a prepared request and decodes a successful JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    provider: &'static str,
    timeout: Duration,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::from_send(e, timeout))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    let raw = response
        .text()
        .await
        .map_err(|e| ProviderError::from_send(e, timeout))?;
    serde_json::from_str(&raw).map_err(|e| ProviderError::MalformedResponse {
        provider,
        details: e.to_string(),
    })
}
