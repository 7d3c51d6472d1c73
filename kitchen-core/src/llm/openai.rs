//! OpenAI-compatible chat-completion provider.

use super::{LlmError, LlmProvider};
use crate::config::{AiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chat-completion provider speaking the OpenAI wire format.
#[derive(Debug)]
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a new OpenAiProvider against the default endpoint.
    pub fn new(api_key: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    pub fn from_config(config: &AiConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY not set".to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            client,
        })
    }

    /// Point the provider at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiError {
    message: String,
}

/// Error response from the API.
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiApiError,
}

fn request_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout(e.to_string())
    } else {
        LlmError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Calling chat completion API"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LlmError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response.text().await.map_err(request_error)?;

        if !(200..300).contains(&status) {
            if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(&body) {
                return Err(LlmError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(LlmError::ApiError {
                status,
                message: body,
            });
        }

        let response: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::ParseError(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::ParseError("No message content in response".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
