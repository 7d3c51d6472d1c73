//! Interpretation of raw model output.
//!
//! The model is asked to answer with JSON carrying a `success` flag. A
//! `success: false` answer is a refusal no matter what else it contains. A
//! `success: true` answer must decode into the payload type and pass the same
//! structural checks recipe creation applies; anything else is malformed.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::PayloadError;
use crate::outcome::CompletionOutcome;
use crate::reference::{CodeBook, ReferenceSnapshot};
use crate::types::{MealPlan, Recipe, Recommendation, RequestKind};

/// Reason reported when the model declines without giving one.
pub const UNSPECIFIED_REFUSAL: &str = "The request was declined without a reason.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Verdict {
    success: bool,
    // Any JSON type is tolerated here; only a string counts as a reason.
    #[serde(default)]
    reason_for_fail: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RecipeEnvelope {
    recipe: Recipe,
}

/// Classify `raw` for a request of `kind` without reference checks.
pub fn interpret(raw: &str, kind: RequestKind) -> CompletionOutcome<Recommendation> {
    match kind {
        RequestKind::Recipe => interpret_recipe(raw, None).map(Recommendation::Recipe),
        RequestKind::MealPlan => interpret_meal_plan(raw, None).map(Recommendation::MealPlan),
    }
}

/// Classify a recipe completion. With a snapshot, category ids and time-unit
/// codes must also exist in it.
pub fn interpret_recipe(
    raw: &str,
    snapshot: Option<&ReferenceSnapshot>,
) -> CompletionOutcome<Recipe> {
    classify(raw, RequestKind::Recipe, |value| {
        let envelope: RecipeEnvelope = serde_json::from_value(value)?;
        check_recipe(&envelope.recipe, snapshot)?;
        Ok(envelope.recipe)
    })
}

/// Classify a meal-plan completion. With a snapshot, every code and category
/// must also exist in it.
pub fn interpret_meal_plan(
    raw: &str,
    snapshot: Option<&ReferenceSnapshot>,
) -> CompletionOutcome<MealPlan> {
    classify(raw, RequestKind::MealPlan, |value| {
        let plan: MealPlan = serde_json::from_value(value)?;
        check_meal_plan(&plan, snapshot)?;
        Ok(plan)
    })
}

fn classify<T>(
    raw: &str,
    kind: RequestKind,
    decode: impl FnOnce(Value) -> Result<T, PayloadError>,
) -> CompletionOutcome<T> {
    let verdict = serde_json::from_str::<Value>(raw).and_then(|value| {
        let verdict = Verdict::deserialize(&value)?;
        Ok((verdict, value))
    });

    let (verdict, value) = match verdict {
        Ok(parsed) => parsed,
        Err(e) => return malformed(raw, kind, PayloadError::InvalidJson(e)),
    };

    if !verdict.success {
        let reason = verdict
            .reason_for_fail
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(UNSPECIFIED_REFUSAL)
            .to_string();
        tracing::info!(kind = kind.as_str(), reason = %reason, "model declined request");
        return CompletionOutcome::DomainRefusal(reason);
    }

    match decode(value) {
        Ok(payload) => CompletionOutcome::Success(payload),
        Err(e) => malformed(raw, kind, e),
    }
}

fn malformed<T>(raw: &str, kind: RequestKind, error: PayloadError) -> CompletionOutcome<T> {
    tracing::warn!(
        kind = kind.as_str(),
        error = %error,
        raw_len = raw.len(),
        "model output does not match schema"
    );
    CompletionOutcome::MalformedOutput {
        raw: raw.to_string(),
        detail: error.to_string(),
    }
}

fn check_recipe(recipe: &Recipe, snapshot: Option<&ReferenceSnapshot>) -> Result<(), PayloadError> {
    recipe.validate()?;
    check_distinct_categories(recipe)?;
    if let Some(snapshot) = snapshot {
        check_recipe_references(recipe, snapshot)?;
    }
    Ok(())
}

/// Category ids form a set.
fn check_distinct_categories(recipe: &Recipe) -> Result<(), PayloadError> {
    let mut seen = Vec::with_capacity(recipe.category_ids.len());
    for id in &recipe.category_ids {
        if seen.contains(id) {
            return Err(PayloadError::DuplicateCategory(*id));
        }
        seen.push(*id);
    }
    Ok(())
}

fn check_recipe_references(
    recipe: &Recipe,
    snapshot: &ReferenceSnapshot,
) -> Result<(), PayloadError> {
    // An empty catalog means categories could not be offered to the model.
    if !snapshot.categories.is_empty() {
        if let Some(id) = recipe
            .category_ids
            .iter()
            .find(|id| !snapshot.has_category(**id))
        {
            return Err(PayloadError::UnknownCategory(*id));
        }
    }

    for (field, code) in [
        ("prepTimeUnitCd", recipe.prep_time_unit_cd),
        ("cookTimeUnitCd", recipe.cook_time_unit_cd),
    ] {
        if !snapshot.accepts_code(CodeBook::TimeUnit, code) {
            return Err(PayloadError::UnknownCode { field, code });
        }
    }
    Ok(())
}

fn check_meal_plan(plan: &MealPlan, snapshot: Option<&ReferenceSnapshot>) -> Result<(), PayloadError> {
    plan.validate()?;

    let mut seen_days = Vec::with_capacity(plan.meal_plan_days.len());
    for day in &plan.meal_plan_days {
        if seen_days.contains(&day.days_of_week_cd) {
            return Err(PayloadError::DuplicateWeekday(day.days_of_week_cd));
        }
        seen_days.push(day.days_of_week_cd);

        for (meal, recipe, substitute) in day.meals() {
            match recipe {
                Some(recipe) => check_distinct_categories(recipe)?,
                None if substitute.is_none() => {
                    return Err(PayloadError::EmptyMealSlot {
                        day: day.days_of_week_cd,
                        meal,
                    });
                }
                None => {}
            }
        }
    }

    if let Some(snapshot) = snapshot {
        for day in &plan.meal_plan_days {
            if !snapshot.accepts_code(CodeBook::DaysOfWeek, day.days_of_week_cd) {
                return Err(PayloadError::UnknownCode {
                    field: "daysOfWeekCd",
                    code: day.days_of_week_cd,
                });
            }
            for (_, recipe, substitute) in day.meals() {
                if let Some(recipe) = recipe {
                    check_recipe_references(recipe, snapshot)?;
                }
                if let Some(code) = substitute {
                    if !snapshot.accepts_code(CodeBook::NonRecipeSubstitution, code) {
                        return Err(PayloadError::UnknownCode {
                            field: "recipeSubstituteCd",
                            code,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}
