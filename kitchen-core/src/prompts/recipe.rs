//! Prompt for a single recipe recommendation.

use super::schema::RECIPE_SCHEMA;
use super::section::{
    category_section, closing_section, code_book_sections, completeness_section, image_section,
    PromptSection, COMMA_SEPARATOR, NEW_LINE,
};
use crate::reference::ReferenceSnapshot;
use crate::types::{RecipeRequest, RequestKind};

/// Prompt name for logs.
pub const RECIPE_PROMPT_NAME: &str = "recipe_recommendation";

pub const SCHEMA_HEADING: &str = "Please create a JSON recipe based on the following schema:";
pub const INGREDIENTS_HEADING: &str = "Base the recipe on the following ingredients:";
pub const PREFERENCES_HEADING: &str =
    "Please tailor the recipe to the following dietary preferences:";
pub const RESTRICTIONS_HEADING: &str = "Here are the allergies and dietary restrictions to respect:";

/// Sections in prompt order: schema, ingredients, preferences, restrictions,
/// categories, time units, image pool, completeness, output rules.
pub fn recipe_sections(
    request: &RecipeRequest,
    snapshot: &ReferenceSnapshot,
    image_urls: &[String],
) -> Vec<PromptSection> {
    let mut sections = vec![PromptSection {
        heading: SCHEMA_HEADING.to_string(),
        lines: vec![RECIPE_SCHEMA.example.to_string()],
        separator: NEW_LINE,
    }];

    sections.extend(PromptSection::list(
        INGREDIENTS_HEADING,
        &request.ingredient_list,
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
    sections.extend(code_book_sections(snapshot, RequestKind::Recipe));
    sections.extend(image_section(image_urls));
    sections.push(completeness_section());
    sections.push(closing_section(RequestKind::Recipe));

    sections
}
