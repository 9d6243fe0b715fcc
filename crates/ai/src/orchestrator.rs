//! Chooses between the configured language model and the rule-based coach.

use std::sync::Arc;
use std::time::Duration;

use ai_client::{AdviceProvider, ProviderError};
use finance_engine::{build_advisor_prompt, build_chat_prompt, generate_advice};
use models::Metrics;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const RULE_BASED_SOURCE: &str = "rule-based";

/// Where a piece of advice came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum AdviceSource {
    /// Provider name, e.g. `gemini`.
    Ai(String),
    RuleBased,
}

impl AdviceSource {
    pub fn label(&self) -> &str {
        match self {
            AdviceSource::Ai(name) => name,
            AdviceSource::RuleBased => RULE_BASED_SOURCE,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, AdviceSource::Ai(_))
    }
}

impl From<AdviceSource> for String {
    fn from(source: AdviceSource) -> Self {
        source.label().to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub text: String,
    pub source: AdviceSource,
}

/// Why a free-form chat question could not be answered.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("AI chat is unavailable: no AI provider is configured")]
    Unavailable,

    #[error("AI provider returned an empty reply")]
    EmptyReply,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Produces advice for every request: the provider when it answers in time,
/// otherwise the deterministic rule-based report.
pub struct AdviceOrchestrator {
    provider: Option<Arc<dyn AdviceProvider>>,
    timeout: Duration,
}

impl AdviceOrchestrator {
    pub fn new(provider: Option<Arc<dyn AdviceProvider>>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// An orchestrator that never calls out.
    pub fn rule_based() -> Self {
        Self::new(None, Duration::from_secs(0))
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    pub async fn get_advice(&self, metrics: &Metrics, goals: Option<&str>) -> Advice {
        if let Some(provider) = &self.provider {
            if let Some(text) = self.ask_provider(provider.as_ref(), metrics, goals).await {
                return Advice {
                    text,
                    source: AdviceSource::Ai(provider.name().to_string()),
                };
            }
        }

        Advice {
            text: generate_advice(metrics, goals),
            source: AdviceSource::RuleBased,
        }
    }

    /// Answers a free-form question. Unlike advice there is no rule-based
    /// fallback, so failures are returned to the caller.
    pub async fn chat(&self, user_message: &str) -> Result<String, ChatError> {
        let provider = self.provider.as_deref().ok_or(ChatError::Unavailable)?;
        let prompt = build_chat_prompt(user_message);
        debug!(provider = provider.name(), prompt_len = prompt.len(), "Requesting AI chat reply");

        let reply = tokio::time::timeout(self.timeout, provider.invoke(&prompt))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))??;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ChatError::EmptyReply);
        }
        Ok(reply.to_string())
    }

    async fn ask_provider(
        &self,
        provider: &dyn AdviceProvider,
        metrics: &Metrics,
        goals: Option<&str>,
    ) -> Option<String> {
        let prompt = build_advisor_prompt(metrics, goals);
        debug!(provider = provider.name(), prompt_len = prompt.len(), "Requesting AI advice");

        match tokio::time::timeout(self.timeout, provider.invoke(&prompt)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Ok(Ok(_)) => {
                warn!(provider = provider.name(), "AI provider returned blank advice, using rule-based advice");
                None
            }
            Ok(Err(e)) => {
                warn!(provider = provider.name(), error = %e, "AI provider failed, using rule-based advice");
                None
            }
            Err(_) => {
                warn!(
                    provider = provider.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "AI provider timed out, using rule-based advice"
                );
                None
            }
        }
    }
}
