use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::{http_client, send_json, AdviceProvider, ProviderError, Result};

const PROVIDER: &str = "huggingface";

/// HuggingFace inference API client for text-generation models.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    http: Client,
    api_key: String,
    api_url: String,
    timeout: Duration,
}

impl HuggingFaceClient {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Result<Self> {
        reqwest::Url::parse(&api_url)
            .map_err(|e| ProviderError::InvalidConfig(format!("Invalid AI_API_URL {api_url}: {e}")))?;

        Ok(Self {
            http: http_client(timeout)?,
            api_key,
            api_url,
            timeout,
        })
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f64,
    top_p: f64,
}

#[async_trait]
impl AdviceProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn invoke(&self, prompt: &str) -> Result<String> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: 600,
                temperature: 0.7,
                top_p: 0.95,
            },
        };

        let request = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body);

        let response: Value = send_json(request, PROVIDER, self.timeout).await?;
        extract_text(&response, prompt)
    }
}

/// Accepts `[{"generated_text": ..}]`, `{"generated_text": ..}` or a bare
/// string, and strips the echoed prompt that text-generation models return.
fn extract_text(response: &Value, prompt: &str) -> Result<String> {
    let generated = match response {
        Value::Array(items) => items.first().and_then(|item| item.get("generated_text")),
        Value::Object(_) => response.get("generated_text"),
        Value::String(_) => Some(response),
        _ => None,
    };

    let text = match generated {
        Some(Value::String(text)) => text,
        Some(other) => {
            return Err(ProviderError::MalformedResponse {
                provider: PROVIDER,
                details: format!("generated_text is not a string: {other}"),
            })
        }
        None => return Err(ProviderError::EmptyResponse(PROVIDER)),
    };

    let text = text.replacen(prompt, "", 1).trim().to_string();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse(PROVIDER));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_response_strips_prompt() {
        let response = json!([{ "generated_text": "PROMPT\n\n1. Cut costs." }]);
        assert_eq!(extract_text(&response, "PROMPT").unwrap(), "1. Cut costs.");
    }

    #[test]
    fn test_object_and_string_responses() {
        assert_eq!(
            extract_text(&json!({ "generated_text": "Advice" }), "x").unwrap(),
            "Advice"
        );
        assert_eq!(extract_text(&json!("Plain advice"), "x").unwrap(), "Plain advice");
    }

    #[test]
    fn test_echo_only_is_empty() {
        let response = json!([{ "generated_text": "PROMPT" }]);
        assert!(matches!(
            extract_text(&response, "PROMPT"),
            Err(ProviderError::EmptyResponse(_))
        ));
        assert!(matches!(
            extract_text(&json!({ "error": "loading" }), "PROMPT"),
            Err(ProviderError::EmptyResponse(_))
        ));
    }

    #[test]
    fn test_non_string_text_is_malformed() {
        let response = json!([{ "generated_text": 42 }]);
        assert!(matches!(
            extract_text(&response, "PROMPT"),
            Err(ProviderError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_url() {
        let err = HuggingFaceClient::new("k".into(), "not a url".into(), Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidConfig(_)));
    }
}
