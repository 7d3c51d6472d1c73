//! End-to-end tests for the recommendation flows.
//!
//! Reference data comes from `tests/fixtures/reference.json`. The model is
//! either a `FakeProvider` or an `OpenAiProvider` pointed at a mock server.

use kitchen_core::{
    CompletionOutcome, ErrorClass, FakeProvider, LlmError, MealPlanRequest, OpenAiProvider,
    PromptBuilder, RecipeRequest, RecommendationRequest, RecommendationService,
    ReferenceSnapshot, RequestKind, StaticReferenceData,
};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

const RECIPE_COMPLETION: &str = include_str!("../src/llm/fixtures/recipe.json");

fn reference() -> Arc<StaticReferenceData> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/reference.json");
    Arc::new(StaticReferenceData::from_json_file(&path).expect("Failed to load reference data"))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_recipe_success_with_restriction() {
    let llm = Arc::new(FakeProvider::with_recommendation_responses());
    let service = RecommendationService::new(reference(), llm.clone());

    let request = RecipeRequest {
        ingredient_list: strings(&["chicken", "rice"]),
        meal_preferences: vec![],
        allergies_and_restrictions: strings(&["peanuts"]),
    };

    let outcome = service.recommend_recipe(&request).await;
    let recipe = match outcome {
        CompletionOutcome::Success(recipe) => recipe,
        other => panic!("expected Success, got {other:?}"),
    };
    assert_eq!(recipe.title, "Chicken and Rice Skillet");
    assert_eq!(recipe.category_ids, vec![3]);
    assert_eq!(recipe.ingredient_groups[0].ingredients.len(), 3);

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Base the recipe on the following ingredients:\nchicken, rice"));
    assert!(prompts[0].contains("peanuts"));
    assert!(!prompts[0].contains("dietary preferences:"));
}

#[tokio::test]
async fn test_recipe_refused_for_conflicting_restriction() {
    let llm = Arc::new(FakeProvider::always(
        r#"{"success":false,"reasonForFail":"ingredient conflicts with restriction"}"#,
    ));
    let service = RecommendationService::new(reference(), llm);

    let request = RecipeRequest {
        ingredient_list: strings(&["milk"]),
        meal_preferences: vec![],
        allergies_and_restrictions: strings(&["dairy"]),
    };

    let outcome = service.recommend_recipe(&request).await;
    assert_eq!(outcome.error_class(), Some(ErrorClass::Validation));
    match outcome {
        CompletionOutcome::DomainRefusal(reason) => {
            assert_eq!(reason, "ingredient conflicts with restriction")
        }
        other => panic!("expected DomainRefusal, got {other:?}"),
    }
}

#[tokio::test]
async fn test_meal_plan_success() {
    let llm = Arc::new(FakeProvider::with_recommendation_responses());
    let service = RecommendationService::new(reference(), llm.clone());

    let request = MealPlanRequest {
        goal_or_purpose: "eat more whole grains".to_string(),
        meal_preferences: strings(&["quick breakfasts"]),
        allergies_and_restrictions: vec![],
    };

    let plan = match service.recommend_meal_plan(&request).await {
        CompletionOutcome::Success(plan) => plan,
        other => panic!("expected Success, got {other:?}"),
    };
    assert_eq!(plan.meal_plan_title, "Balanced Week");
    assert_eq!(plan.meal_plan_days.len(), 7);

    let prompt = &llm.prompts()[0];
    assert!(prompt.contains("eat more whole grains"));
    assert!(prompt.contains("1: Monday"));
    assert!(prompt.contains("2: Eat out"));
}

#[tokio::test]
async fn test_prompt_matches_builder_output() {
    let reference = reference();
    let llm = Arc::new(FakeProvider::with_recommendation_responses());
    let service = RecommendationService::new(reference.clone(), llm.clone());

    let request = RecipeRequest {
        ingredient_list: strings(&["tofu"]),
        meal_preferences: strings(&["vegan"]),
        allergies_and_restrictions: vec![],
    };
    service.recommend_recipe(&request).await;

    let snapshot = ReferenceSnapshot::capture(reference.as_ref(), RequestKind::Recipe).await;
    let expected = PromptBuilder::new().build_prompt(&RecommendationRequest::Recipe(request), &snapshot);
    assert_eq!(llm.prompts()[0], expected);
}

#[tokio::test]
async fn test_http_error_is_transport_failure() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body(r#"{"error": {"message": "The server had an error"}}"#)
        .expect(1)
        .create_async()
        .await;

    let llm = Arc::new(
        OpenAiProvider::new("test-key".to_string(), "gpt-test".to_string())
            .with_base_url(server.url()),
    );
    let service = RecommendationService::new(reference(), llm);

    let outcome = service.recommend_recipe(&RecipeRequest::default()).await;
    assert_eq!(outcome.status_code(), 503);
    assert!(matches!(
        outcome,
        CompletionOutcome::TransportFailure(LlmError::ApiError { status: 500, .. })
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_recipe_success() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": RECIPE_COMPLETION},
            "finish_reason": "stop"
        }]
    });
    let _m = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let llm = Arc::new(
        OpenAiProvider::new("test-key".to_string(), "gpt-test".to_string())
            .with_base_url(server.url()),
    );
    let service = RecommendationService::new(reference(), llm);

    let request = RecipeRequest {
        ingredient_list: strings(&["chicken", "rice"]),
        ..Default::default()
    };
    let result = service.recommend_recipe(&request).await.into_result();
    assert!(result.success);
    assert_eq!(
        result.payload.map(|r| r.title).as_deref(),
        Some("Chicken and Rice Skillet")
    );
}

#[tokio::test]
async fn test_http_prose_answer_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "choices": [{"message": {"role": "assistant", "content": "Here is a lovely recipe for you!"}}]
    });
    let _m = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let llm = Arc::new(
        OpenAiProvider::new("test-key".to_string(), "gpt-test".to_string())
            .with_base_url(server.url()),
    );
    let service = RecommendationService::new(reference(), llm);

    let outcome = service.recommend_meal_plan(&MealPlanRequest::default()).await;
    assert_eq!(outcome.error_class(), Some(ErrorClass::Generation));
    match outcome {
        CompletionOutcome::MalformedOutput { raw, .. } => {
            assert_eq!(raw, "Here is a lovely recipe for you!")
        }
        other => panic!("expected MalformedOutput, got {other:?}"),
    }
}
