//! AI configuration from environment variables.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default OpenAI-compatible base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout. A full meal plan is a long completion.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Which completion backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Fake,
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: ProviderKind,
    /// Bearer token for the completion API. Required for `ProviderKind::OpenAi`.
    pub api_key: Option<String>,
    /// Model name (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API; `/chat/completions` is appended.
    pub base_url: String,
    pub timeout: Duration,
    /// Image URLs the model may pick from for generated recipes.
    pub image_urls: Vec<String>,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// - `KITCHEN_AI_PROVIDER`: "openai" (default) or "fake"
    /// - `OPENAI_API_KEY`: API key, required for the openai provider
    /// - `KITCHEN_AI_MODEL`: Model name (default: "gpt-4o-mini")
    /// - `KITCHEN_AI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
    /// - `KITCHEN_AI_TIMEOUT_SECS`: Request timeout (default: 120)
    /// - `KITCHEN_AI_IMAGE_URLS`: Comma-separated image URL pool (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let provider = match lookup("KITCHEN_AI_PROVIDER").as_deref() {
            None | Some("openai") => ProviderKind::OpenAi,
            Some("fake") => ProviderKind::Fake,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "KITCHEN_AI_PROVIDER".to_string(),
                    value: other.to_string(),
                })
            }
        };

        let api_key = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty());
        if provider == ProviderKind::OpenAi && api_key.is_none() {
            return Err(ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()));
        }

        let model = lookup("KITCHEN_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url =
            lookup("KITCHEN_AI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("KITCHEN_AI_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                name: "KITCHEN_AI_TIMEOUT_SECS".to_string(),
                value: v.clone(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let image_urls = Self::image_urls_from_lookup(&lookup);

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            image_urls,
        })
    }

    /// Read only the image URL pool. Needs no provider credentials, so it
    /// works for composing prompts offline.
    pub fn image_urls_from_env() -> Vec<String> {
        Self::image_urls_from_lookup(|name| env::var(name).ok())
    }

    pub fn image_urls_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        lookup("KITCHEN_AI_IMAGE_URLS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}
