//! Prompt for a one-week meal plan recommendation.

use super::schema::MEAL_PLAN_SCHEMA;
use super::section::{
    category_section, closing_section, code_book_sections, completeness_section, image_section,
    PromptSection, COMMA_SEPARATOR, NEW_LINE,
};
use crate::reference::ReferenceSnapshot;
use crate::types::{MealPlanRequest, RequestKind};

/// Prompt name for logs.
pub const MEAL_PLAN_PROMPT_NAME: &str = "meal_plan_recommendation";

pub const SCHEMA_HEADING: &str =
    "Please generate a 1 week meal plan as JSON using the following schema:";
pub const SHAPE_INSTRUCTION: &str = "Provide 3 recipes for each day, breakfast, lunch and dinner, for all 7 days of the week. That is 21 meals for the whole meal plan week.";
pub const GOAL_HEADING: &str = "Please tailor the meal plan to this goal:";
pub const PREFERENCES_HEADING: &str =
    "Please tailor the recipes to the following dietary preferences:";
pub const RESTRICTIONS_HEADING: &str = "Here are the allergies and dietary restrictions to respect:";

/// Sections in prompt order: schema, weekly shape, goal, preferences,
/// restrictions, categories, time units, weekdays, substitutions, image pool,
/// completeness, output rules.
pub fn meal_plan_sections(
    request: &MealPlanRequest,
    snapshot: &ReferenceSnapshot,
    image_urls: &[String],
) -> Vec<PromptSection> {
    let mut sections = vec![
        PromptSection {
            heading: SCHEMA_HEADING.to_string(),
            lines: vec![MEAL_PLAN_SCHEMA.example.to_string()],
            separator: NEW_LINE,
        },
        PromptSection::fixed(SHAPE_INSTRUCTION, &[]),
    ];

    sections.extend(PromptSection::list(
        GOAL_HEADING,
        &[request.goal_or_purpose.as_str()],
        COMMA_SEPARATOR,
    ));
    sections.extend(PromptSection::list(
        PREFERENCES_HEADING,
        &request.meal_preferences,
        COMMA_SEPARATOR,
    ));
    sections.extend(PromptSection::list(
        RESTRICTIONS_HEADING,
        &request.allergies_and_restrictions,
        COMMA_SEPARATOR,
    ));
    sections.extend(category_section(snapshot));
    sections.extend(code_book_sections(snapshot, RequestKind::MealPlan));
    sections.extend(image_section(image_urls));
    sections.push(completeness_section());
    sections.push(closing_section(RequestKind::MealPlan));

    sections
}
