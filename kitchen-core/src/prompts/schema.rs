//! Output schemas embedded in recommendation prompts.
//!
//! Each schema is example JSON with placeholder values showing the exact
//! shape the model must return. Bump `version` whenever the shape changes.

use crate::types::RequestKind;

/// Example JSON describing the expected completion for one request kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSchema {
    pub kind: RequestKind,
    pub version: u32,
    pub example: &'static str,
}

impl OutputSchema {
    pub fn for_kind(kind: RequestKind) -> &'static OutputSchema {
        match kind {
            RequestKind::Recipe => &RECIPE_SCHEMA,
            RequestKind::MealPlan => &MEAL_PLAN_SCHEMA,
        }
    }
}

macro_rules! recipe_example {
    () => {
        r#"{
    "title": "string",
    "summary": "string",
    "prepTime": 1,
    "prepTimeUnitCd": 1,
    "cookTime": 1,
    "cookTimeUnitCd": 1,
    "servings": 1,
    "yield": "string",
    "imageUrl": "string",
    "thumbnailUrl": "string",
    "calories": 0,
    "carbsG": 0,
    "sugarsG": 0,
    "fatG": 0,
    "categoryIds": [0],
    "ingredientGroups": [
      {
        "ingredientGroupOrder": 1,
        "label": "string",
        "ingredients": [
          {
            "ingredientOrder": 1,
            "imageUrl": "string",
            "label": "string"
          }
        ]
      }
    ],
    "stepGroups": [
      {
        "stepGroupOrder": 1,
        "label": "string",
        "steps": [
          {
            "stepOrder": 1,
            "label": "string",
            "imageUrl": "string"
          }
        ]
      }
    ]
  }"#
    };
}

pub const RECIPE_SCHEMA: OutputSchema = OutputSchema {
    kind: RequestKind::Recipe,
    version: 1,
    example: concat!(
        r#"{
  "success": true,
  "reasonForFail": "string",
  "recipe": "#,
        recipe_example!(),
        "\n}"
    ),
};

pub const MEAL_PLAN_SCHEMA: OutputSchema = OutputSchema {
    kind: RequestKind::MealPlan,
    version: 1,
    example: concat!(
        r#"{
  "success": true,
  "reasonForFail": "string",
  "mealPlanTitle": "string",
  "mealPlanDays": [
    {
      "breakfastRecipe": "#,
        recipe_example!(),
        r#",
      "lunchRecipe": "#,
        recipe_example!(),
        r#",
      "dinnerRecipe": "#,
        recipe_example!(),
        r#",
      "breakfastRecipeSubstituteCd": 1,
      "lunchRecipeSubstituteCd": 1,
      "dinnerRecipeSubstituteCd": 1,
      "daysOfWeekCd": 1
    }
  ]
}"#
    ),
};
