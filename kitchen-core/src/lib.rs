pub mod config;
pub mod error;
pub mod interpret;
pub mod llm;
pub mod outcome;
pub mod prompts;
pub mod reference;
pub mod service;
pub mod types;

pub use config::{AiConfig, ConfigError, ProviderKind};
pub use error::{PayloadError, ReferenceError};
pub use interpret::{interpret, interpret_meal_plan, interpret_recipe};
pub use llm::{
    create_provider, create_provider_from_env, FakeProvider, LlmError, LlmProvider,
    OpenAiProvider,
};
pub use outcome::{CompletionOutcome, ErrorClass, RecommendationResult};
pub use prompts::{OutputSchema, PromptBuilder, PromptSection};
pub use reference::{
    Category, CodeBook, CodeBookId, CodeValue, ReferenceDataProvider, ReferenceSnapshot,
    StaticReferenceData,
};
pub use service::RecommendationService;
pub use types::{
    Ingredient, IngredientGroup, MealPlan, MealPlanDay, MealPlanRequest, Recipe,
    RecipeRequest, Recommendation, RecommendationRequest, RequestKind, Step, StepGroup,
};
