//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests and offline runs to work without network access or API costs.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::sync::Mutex;

const RECIPE_RESPONSE: &str = include_str!("fixtures/recipe.json");
const MEAL_PLAN_RESPONSE: &str = include_str!("fixtures/meal_plan.json");

#[derive(Debug, Clone)]
enum FakeResponse {
    Text(String),
    Error(String),
}

/// A fake LLM provider for testing.
///
/// Responses are matched by checking if the prompt contains a registered
/// substring, in registration order. Every prompt received is recorded.
#[derive(Debug, Default)]
pub struct FakeProvider {
    /// (prompt substring, response) pairs; first match wins.
    responses: Vec<(String, FakeResponse)>,
    /// Response if no pattern matches.
    default_response: Option<FakeResponse>,
    prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        Self::new().add_response(prompt_contains, response)
    }

    /// Create a FakeProvider that answers every prompt with `response`.
    pub fn always(response: &str) -> Self {
        Self::new().with_default_response(response)
    }

    /// Create a FakeProvider whose every call fails at the transport level.
    pub fn failing(message: &str) -> Self {
        Self {
            default_response: Some(FakeResponse::Error(message.to_string())),
            ..Self::default()
        }
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses.push((
            prompt_contains.to_lowercase(),
            FakeResponse::Text(response.to_string()),
        ));
        self
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(FakeResponse::Text(response.to_string()));
        self
    }

    /// Create a FakeProvider with valid canned responses for both
    /// recommendation flows.
    pub fn with_recommendation_responses() -> Self {
        Self::new()
            .add_response("meal plan", MEAL_PLAN_RESPONSE)
            .add_response("JSON recipe", RECIPE_RESPONSE)
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        match self.prompts.lock() {
            Ok(prompts) => prompts.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, prompt: &str) {
        match self.prompts.lock() {
            Ok(mut prompts) => prompts.push(prompt.to_string()),
            Err(poisoned) => poisoned.into_inner().push(prompt.to_string()),
        }
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.record(prompt);

        let prompt_lower = prompt.to_lowercase();
        let matched = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
            .map(|(_, response)| response)
            .or(self.default_response.as_ref());

        match matched {
            Some(FakeResponse::Text(text)) => Ok(text.clone()),
            Some(FakeResponse::Error(message)) => Err(LlmError::RequestFailed(message.clone())),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_provider_matching() {
        let provider = FakeProvider::with_response("hello", "world");
        let result = provider.complete("Say hello to the user").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_case_insensitive() {
        let provider = FakeProvider::with_response("HELLO", "world");
        let result = provider.complete("hello there").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_first_match_wins() {
        let provider = FakeProvider::new()
            .add_response("meal plan", "plan")
            .add_response("recipe", "recipe");
        let result = provider.complete("a meal plan of recipes").await.unwrap();
        assert_eq!(result, "plan");
    }

    #[tokio::test]
    async fn test_fake_provider_no_match() {
        let provider = FakeProvider::new();
        let result = provider.complete("random prompt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_provider_failing() {
        let provider = FakeProvider::failing("connection reset");
        let err = provider.complete("anything").await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_fake_provider_records_prompts() {
        let provider = FakeProvider::always("{}");
        provider.complete("first").await.unwrap();
        provider.complete("second").await.unwrap();
        assert_eq!(provider.prompts(), vec!["first", "second"]);
    }

    #[test]
    fn test_canned_responses_are_json() {
        for body in [RECIPE_RESPONSE, MEAL_PLAN_RESPONSE] {
            let value: serde_json::Value = serde_json::from_str(body).unwrap();
            assert_eq!(value["success"], true);
        }
    }
}
