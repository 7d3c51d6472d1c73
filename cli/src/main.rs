use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use kitchen_core::{
    create_provider, AiConfig, CompletionOutcome, MealPlanRequest, PromptBuilder, RecipeRequest,
    RecommendationRequest, RecommendationService, ReferenceSnapshot, StaticReferenceData,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "kitchen")]
#[command(about = "AI recipe and meal-plan recommendations", long_about = None)]
struct Cli {
    /// JSON file with categories and code books
    #[arg(long, global = true, default_value = "reference.json")]
    reference: PathBuf,

    /// Print the prompt that would be sent instead of calling the model
    #[arg(long, global = true)]
    prompt_only: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a single recipe from ingredients
    Recipe {
        /// Ingredient to base the recipe on (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        #[command(flatten)]
        diet: DietArgs,
    },
    /// Recommend a one-week meal plan
    MealPlan {
        /// What the meal plan should help with
        #[arg(long, default_value = "")]
        goal: String,
        #[command(flatten)]
        diet: DietArgs,
    },
}

#[derive(Args)]
struct DietArgs {
    /// Dietary preference (repeatable)
    #[arg(long = "preference")]
    preferences: Vec<String>,
    /// Allergy or dietary restriction (repeatable)
    #[arg(long = "restriction")]
    restrictions: Vec<String>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let request = match cli.command {
        Commands::Recipe { ingredients, diet } => RecommendationRequest::Recipe(RecipeRequest {
            ingredient_list: ingredients,
            meal_preferences: diet.preferences,
            allergies_and_restrictions: diet.restrictions,
        }),
        Commands::MealPlan { goal, diet } => RecommendationRequest::MealPlan(MealPlanRequest {
            goal_or_purpose: goal,
            meal_preferences: diet.preferences,
            allergies_and_restrictions: diet.restrictions,
        }),
    };

    let reference = StaticReferenceData::from_json_file(&cli.reference)
        .with_context(|| format!("loading {}", cli.reference.display()))?;

    if cli.prompt_only {
        let prompts = PromptBuilder::new().with_image_urls(AiConfig::image_urls_from_env());
        let snapshot = ReferenceSnapshot::capture(&reference, request.kind()).await;
        println!("{}", prompts.build_prompt(&request, &snapshot));
        return Ok(());
    }

    let config = AiConfig::from_env()?;
    let prompts = PromptBuilder::new().with_image_urls(config.image_urls.clone());
    let llm = create_provider(&config)?;
    tracing::info!(
        provider = llm.provider_name(),
        model = llm.model_name(),
        kind = request.kind().as_str(),
        "Requesting recommendation"
    );

    let service = RecommendationService::new(Arc::new(reference), llm).with_prompt_builder(prompts);

    let success = match request {
        RecommendationRequest::Recipe(r) => print_outcome(service.recommend_recipe(&r).await)?,
        RecommendationRequest::MealPlan(r) => {
            print_outcome(service.recommend_meal_plan(&r).await)?
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the caller-facing result as JSON. Returns whether it succeeded.
fn print_outcome<T: Serialize>(outcome: CompletionOutcome<T>) -> Result<bool> {
    match &outcome {
        CompletionOutcome::MalformedOutput { raw, detail } => {
            tracing::error!(%detail, "Model output rejected");
            tracing::debug!(%raw, "Rejected model output");
        }
        CompletionOutcome::TransportFailure(e) => {
            tracing::error!(error = %e, "Completion request failed");
        }
        _ => {}
    }

    let status = outcome.status_code();
    let result = outcome.into_result();
    println!("{}", serde_json::to_string_pretty(&result)?);
    tracing::info!(status, success = result.success, "Recommendation finished");

    Ok(result.success)
}
