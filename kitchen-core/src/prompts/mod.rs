//! Recommendation prompt templates.
//!
//! Prompts are assembled from an ordered list of [`PromptSection`]s and
//! rendered last. Building is a pure function of the request, the reference
//! snapshot and the builder's image pool, so the same inputs always produce
//! byte-identical text.

pub mod meal_plan;
pub mod recipe;
pub mod schema;
pub mod section;

pub use meal_plan::{meal_plan_sections, MEAL_PLAN_PROMPT_NAME};
pub use recipe::{recipe_sections, RECIPE_PROMPT_NAME};
pub use schema::{OutputSchema, MEAL_PLAN_SCHEMA, RECIPE_SCHEMA};
pub use section::{render_sections, PromptSection};

use crate::reference::ReferenceSnapshot;
use crate::types::{MealPlanRequest, RecipeRequest, RecommendationRequest};

/// Builds recommendation prompts.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    image_urls: Vec<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer the model a fixed pool of image URLs for generated recipes.
    pub fn with_image_urls(mut self, image_urls: Vec<String>) -> Self {
        self.image_urls = image_urls;
        self
    }

    pub fn build_sections(
        &self,
        request: &RecommendationRequest,
        snapshot: &ReferenceSnapshot,
    ) -> Vec<PromptSection> {
        match request {
            RecommendationRequest::Recipe(r) => recipe_sections(r, snapshot, &self.image_urls),
            RecommendationRequest::MealPlan(r) => {
                meal_plan_sections(r, snapshot, &self.image_urls)
            }
        }
    }

    pub fn build_prompt(
        &self,
        request: &RecommendationRequest,
        snapshot: &ReferenceSnapshot,
    ) -> String {
        render_sections(&self.build_sections(request, snapshot))
    }

    pub fn build_recipe_prompt(&self, request: &RecipeRequest, snapshot: &ReferenceSnapshot) -> String {
        render_sections(&recipe_sections(request, snapshot, &self.image_urls))
    }

    pub fn build_meal_plan_prompt(
        &self,
        request: &MealPlanRequest,
        snapshot: &ReferenceSnapshot,
    ) -> String {
        render_sections(&meal_plan_sections(request, snapshot, &self.image_urls))
    }
}
