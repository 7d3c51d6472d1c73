//! Remote completion clients.
//!
//! The recommendation pipeline sends a single user-role prompt to a
//! chat-completion model and reads back the raw text. This module provides a
//! trait over that round trip with an OpenAI-compatible implementation and a
//! fake for tests and offline runs.

mod fake;
mod openai;

pub use fake::FakeProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{AiConfig, ProviderKind};

/// Error type for LLM operations. Every variant is a transport-level failure
/// from the pipeline's point of view.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API request timed out: {0}")]
    Timeout(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for LLM providers.
///
/// Implementations should be stateless and thread-safe. One call is one
/// outbound request; providers never retry.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt as a single user message and return the model's text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "openai", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// Build the provider selected by `config`.
pub fn create_provider(config: &AiConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    match config.provider {
        ProviderKind::Fake => Ok(Arc::new(FakeProvider::with_recommendation_responses())),
        ProviderKind::OpenAi => Ok(Arc::new(OpenAiProvider::from_config(config)?)),
    }
}

/// Build a provider from environment variables. See [`AiConfig::from_env`].
pub fn create_provider_from_env() -> Result<Arc<dyn LlmProvider>, LlmError> {
    let config = AiConfig::from_env().map_err(|e| LlmError::NotConfigured(e.to_string()))?;
    create_provider(&config)
}
