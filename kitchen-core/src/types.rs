use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::reference::CodeBook;

/// The two recommendation flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Recipe,
    MealPlan,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Recipe => "recipe",
            RequestKind::MealPlan => "meal_plan",
        }
    }

    /// Code books whose values are listed in the prompt, in prompt order.
    pub fn code_books(&self) -> &'static [CodeBook] {
        match self {
            RequestKind::Recipe => &[CodeBook::TimeUnit],
            RequestKind::MealPlan => &[
                CodeBook::TimeUnit,
                CodeBook::DaysOfWeek,
                CodeBook::NonRecipeSubstitution,
            ],
        }
    }
}

/// Inputs for a single-recipe recommendation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[serde(default)]
    pub ingredient_list: Vec<String>,
    #[serde(default)]
    pub meal_preferences: Vec<String>,
    #[serde(default)]
    pub allergies_and_restrictions: Vec<String>,
}

/// Inputs for a one-week meal plan (seven days, three meals a day).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    #[serde(default)]
    pub goal_or_purpose: String,
    #[serde(default)]
    pub meal_preferences: Vec<String>,
    #[serde(default)]
    pub allergies_and_restrictions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationRequest {
    Recipe(RecipeRequest),
    MealPlan(MealPlanRequest),
}

impl RecommendationRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            RecommendationRequest::Recipe(_) => RequestKind::Recipe,
            RecommendationRequest::MealPlan(_) => RequestKind::MealPlan,
        }
    }
}

/// A generated recipe, shaped like the recipe DTO accepted by recipe creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub summary: Option<String>,
    #[validate(range(min = 1))]
    pub prep_time: i32,
    pub prep_time_unit_cd: i32,
    #[validate(range(min = 1))]
    pub cook_time: i32,
    pub cook_time_unit_cd: i32,
    #[validate(range(min = 1))]
    pub servings: i32,
    #[serde(default, rename = "yield")]
    #[validate(length(max = 255))]
    pub recipe_yield: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub thumbnail_url: Option<String>,
    #[validate(range(min = 0.0))]
    pub calories: f64,
    #[validate(range(min = 0.0))]
    pub carbs_g: f64,
    #[validate(range(min = 0.0))]
    pub sugars_g: f64,
    #[validate(range(min = 0.0))]
    pub fat_g: f64,
    #[validate(length(min = 1))]
    pub category_ids: Vec<i32>,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub ingredient_groups: Vec<IngredientGroup>,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub step_groups: Vec<StepGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IngredientGroup {
    #[validate(range(min = 1))]
    pub ingredient_group_order: i32,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub label: Option<String>,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[validate(range(min = 1))]
    pub ingredient_order: i32,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StepGroup {
    #[validate(range(min = 1))]
    pub step_group_order: i32,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub label: Option<String>,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[validate(range(min = 1))]
    pub step_order: i32,
    #[validate(length(min = 1))]
    pub label: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

/// A generated one-week meal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    #[validate(length(min = 1, max = 255))]
    pub meal_plan_title: String,
    #[validate(length(min = 7, max = 7))]
    #[validate(nested)]
    pub meal_plan_days: Vec<MealPlanDay>,
}

/// One day of a meal plan. Each meal slot holds a recipe, a substitution
/// code (leftovers, eating out, ...), or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanDay {
    #[serde(default)]
    #[validate(nested)]
    pub breakfast_recipe: Option<Recipe>,
    #[serde(default)]
    #[validate(nested)]
    pub lunch_recipe: Option<Recipe>,
    #[serde(default)]
    #[validate(nested)]
    pub dinner_recipe: Option<Recipe>,
    #[serde(default)]
    pub breakfast_recipe_substitute_cd: Option<i32>,
    #[serde(default)]
    pub lunch_recipe_substitute_cd: Option<i32>,
    #[serde(default)]
    pub dinner_recipe_substitute_cd: Option<i32>,
    pub days_of_week_cd: i32,
}

impl MealPlanDay {
    /// Meal slots in serving order as (name, recipe, substitute code).
    pub fn meals(&self) -> [(&'static str, Option<&Recipe>, Option<i32>); 3] {
        [
            (
                "breakfast",
                self.breakfast_recipe.as_ref(),
                self.breakfast_recipe_substitute_cd,
            ),
            (
                "lunch",
                self.lunch_recipe.as_ref(),
                self.lunch_recipe_substitute_cd,
            ),
            (
                "dinner",
                self.dinner_recipe.as_ref(),
                self.dinner_recipe_substitute_cd,
            ),
        ]
    }
}

/// Decoded payload of either flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Recommendation {
    Recipe(Recipe),
    MealPlan(MealPlan),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_lists_default_to_empty() {
        let request: RecipeRequest =
            serde_json::from_str(r#"{"ingredientList": ["chicken"]}"#).unwrap();
        assert_eq!(request.ingredient_list, vec!["chicken".to_string()]);
        assert!(request.meal_preferences.is_empty());
        assert!(request.allergies_and_restrictions.is_empty());

        let request: MealPlanRequest = serde_json::from_str("{}").unwrap();
        assert!(request.goal_or_purpose.is_empty());
    }

    #[test]
    fn test_yield_field_name() {
        let json = r#"{
            "title": "Soup", "prepTime": 5, "prepTimeUnitCd": 1, "cookTime": 10,
            "cookTimeUnitCd": 1, "servings": 2, "yield": "2 bowls", "calories": 100,
            "carbsG": 10, "sugarsG": 1, "fatG": 2, "categoryIds": [1],
            "ingredientGroups": [], "stepGroups": []
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.recipe_yield.as_deref(), Some("2 bowls"));
        // Empty groups decode but do not validate.
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_meal_plan_code_books() {
        assert_eq!(RequestKind::Recipe.code_books(), &[CodeBook::TimeUnit]);
        assert_eq!(RequestKind::MealPlan.code_books().len(), 3);
    }
}
