use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{http_client, send_json, AdviceProvider, ProviderError, Result};

const PROVIDER: &str = "ollama";

const SYSTEM_PROMPT: &str = "You are a practical personal finance coach. \
Answer with a short financial health summary, three concrete recommendations \
and this month's action steps. Use the currency given in the profile.";

/// Minimal client for a local Ollama server.
///
/// Refuses to run if the configured base URL is not local.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    base_url: Url,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: String, timeout: Duration) -> Result<Self> {
        let base_url = validate_local_base_url(base_url)?;

        Ok(Self {
            http: http_client(timeout)?,
            base_url,
            model,
            timeout,
        })
    }
}

#[async_trait]
impl AdviceProvider for OllamaClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    /// Single-turn chat call.
    async fn invoke(&self, prompt: &str) -> Result<String> {
        let endpoint = self
            .base_url
            .join("api/chat")
            .map_err(|e| ProviderError::InvalidConfig(format!("Failed to build Ollama /api/chat URL: {e}")))?;

        let request = OllamaChatRequest {
            model: self.model.clone(),
            stream: false,
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            options: Some(OllamaOptions {
                temperature: Some(0.7),
            }),
        };

        let response: OllamaChatResponse =
            send_json(self.http.post(endpoint).json(&request), PROVIDER, self.timeout).await?;

        let content = response
            .message
            .map(|m| m.content.trim().to_string())
            .unwrap_or_default();
        if content.is_empty() {
            return Err(ProviderError::EmptyResponse(PROVIDER));
        }
        Ok(content)
    }
}

fn validate_local_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| ProviderError::InvalidConfig(format!("Invalid OLLAMA_BASE_URL {base_url}: {e}")))?;

    match url.scheme() {
        "http" => {}
        other => {
            return Err(ProviderError::InvalidConfig(format!(
                "Unsupported scheme '{other}' for OLLAMA_BASE_URL (use http://localhost:11434)"
            )))
        }
    }

    let host = url
        .host_str()
        .ok_or_else(|| ProviderError::InvalidConfig("OLLAMA_BASE_URL is missing a host".to_string()))?;

    let is_local = host.eq_ignore_ascii_case("localhost")
        || host == "127.0.0.1"
        || host == "::1"
        || host == "[::1]";

    if !is_local {
        return Err(ProviderError::InvalidConfig(format!(
            "Refusing non-local OLLAMA_BASE_URL host '{host}' (use http://localhost:11434)"
        )));
    }

    Ok(url)
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: Option<Message>,
}
