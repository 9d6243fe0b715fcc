use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Anything that can go wrong while asking an external model for advice.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),

    #[error("{provider} returned a malformed response: {details}")]
    MalformedResponse {
        provider: &'static str,
        details: String,
    },

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),

    #[error("Provider call timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Drops the request URL from transport errors so credentials or
    /// prompt data in it never reach logs.
    pub(crate) fn from_send(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(timeout)
        } else {
            ProviderError::Http(err.without_url())
        }
    }
}
