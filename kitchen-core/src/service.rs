//! Recipe and meal-plan recommendations.

use std::sync::Arc;

use crate::interpret::{interpret_meal_plan, interpret_recipe};
use crate::llm::{LlmError, LlmProvider};
use crate::outcome::CompletionOutcome;
use crate::prompts::{OutputSchema, PromptBuilder, MEAL_PLAN_PROMPT_NAME, RECIPE_PROMPT_NAME};
use crate::reference::{ReferenceDataProvider, ReferenceSnapshot};
use crate::types::{MealPlan, MealPlanRequest, Recipe, RecipeRequest, RequestKind};

/// Runs both recommendation flows: snapshot reference data, build the
/// prompt, make one completion call, interpret the answer.
///
/// Holds no per-request state, so one instance can serve concurrent callers.
/// Nothing is retried; every failure is returned to the caller.
#[derive(Clone)]
pub struct RecommendationService {
    reference: Arc<dyn ReferenceDataProvider>,
    llm: Arc<dyn LlmProvider>,
    prompts: PromptBuilder,
}

impl RecommendationService {
    pub fn new(reference: Arc<dyn ReferenceDataProvider>, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            reference,
            llm,
            prompts: PromptBuilder::new(),
        }
    }

    pub fn with_prompt_builder(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    pub async fn recommend_recipe(&self, request: &RecipeRequest) -> CompletionOutcome<Recipe> {
        let snapshot = ReferenceSnapshot::capture(self.reference.as_ref(), RequestKind::Recipe).await;
        let prompt = self.prompts.build_recipe_prompt(request, &snapshot);

        match self.complete(RECIPE_PROMPT_NAME, RequestKind::Recipe, &prompt).await {
            Ok(raw) => interpret_recipe(&raw, Some(&snapshot)),
            Err(e) => CompletionOutcome::TransportFailure(e),
        }
    }

    pub async fn recommend_meal_plan(
        &self,
        request: &MealPlanRequest,
    ) -> CompletionOutcome<MealPlan> {
        let snapshot =
            ReferenceSnapshot::capture(self.reference.as_ref(), RequestKind::MealPlan).await;
        let prompt = self.prompts.build_meal_plan_prompt(request, &snapshot);

        match self.complete(MEAL_PLAN_PROMPT_NAME, RequestKind::MealPlan, &prompt).await {
            Ok(raw) => interpret_meal_plan(&raw, Some(&snapshot)),
            Err(e) => CompletionOutcome::TransportFailure(e),
        }
    }

    async fn complete(
        &self,
        prompt_name: &str,
        kind: RequestKind,
        prompt: &str,
    ) -> Result<String, LlmError> {
        tracing::debug!(
            prompt_name,
            schema_version = OutputSchema::for_kind(kind).version,
            provider = self.llm.provider_name(),
            model = self.llm.model_name(),
            prompt_len = prompt.len(),
            "Requesting recommendation"
        );

        let result = self.llm.complete(prompt).await;
        if let Err(e) = &result {
            tracing::warn!(prompt_name, error = %e, "Completion request failed");
        }
        result
    }
}
