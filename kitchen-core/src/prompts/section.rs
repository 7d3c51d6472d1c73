//! Prompt sections and the fragments shared by both recommendation flows.

use crate::reference::{CodeBook, ReferenceSnapshot};
use crate::types::RequestKind;

/// Separator for user-supplied lists (ingredients, preferences, ...).
pub const COMMA_SEPARATOR: &str = ", ";

/// Separator for listings (categories, code values, fixed rules).
pub const NEW_LINE: &str = "\n";

/// Text between rendered sections.
pub const SECTION_BREAK: &str = "\n\n";

/// A heading line followed by its content lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSection {
    pub heading: String,
    pub lines: Vec<String>,
    pub separator: &'static str,
}

impl PromptSection {
    /// A section that is always emitted.
    pub fn fixed(heading: &str, lines: &[&str]) -> Self {
        Self {
            heading: heading.to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            separator: NEW_LINE,
        }
    }

    /// A section listing `items`, or `None` when there is nothing to list.
    /// Blank items are dropped; an absent section means "no constraint".
    pub fn list<S: AsRef<str>>(
        heading: &str,
        items: &[S],
        separator: &'static str,
    ) -> Option<Self> {
        let lines: Vec<String> = items
            .iter()
            .map(|item| item.as_ref().trim())
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect();

        if lines.is_empty() {
            return None;
        }

        Some(Self {
            heading: heading.to_string(),
            lines,
            separator,
        })
    }

    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return self.heading.clone();
        }
        format!("{}{}{}", self.heading, NEW_LINE, self.lines.join(self.separator))
    }
}

/// Concatenate sections in the given order.
pub fn render_sections(sections: &[PromptSection]) -> String {
    sections
        .iter()
        .map(PromptSection::render)
        .collect::<Vec<_>>()
        .join(SECTION_BREAK)
}

pub const CATEGORY_HEADING: &str = "Here are the categoryIds and categories available:";

/// `"<id>: <name>"` per category, in snapshot order.
pub fn category_section(snapshot: &ReferenceSnapshot) -> Option<PromptSection> {
    let lines: Vec<String> = snapshot
        .categories
        .iter()
        .map(|c| format!("{}: {}", c.id, c.name))
        .collect();
    PromptSection::list(CATEGORY_HEADING, &lines, NEW_LINE)
}

fn code_book_heading(book: CodeBook) -> &'static str {
    match book {
        CodeBook::TimeUnit => "Here are the only values for prepTimeUnitCd and cookTimeUnitCd:",
        CodeBook::DaysOfWeek => "Here are the only values for daysOfWeekCd:",
        CodeBook::NonRecipeSubstitution => {
            "Here are the only values for breakfastRecipeSubstituteCd, lunchRecipeSubstituteCd and dinnerRecipeSubstituteCd. You may use a substitution instead of a recipe for some meals:"
        }
    }
}

/// `"<code>: <description>"` per value, or `None` if the code book is absent.
pub fn code_book_section(snapshot: &ReferenceSnapshot, book: CodeBook) -> Option<PromptSection> {
    let values = snapshot.code_values(book)?;
    let lines: Vec<String> = values
        .iter()
        .map(|v| format!("{}: {}", v.code, v.description))
        .collect();
    PromptSection::list(code_book_heading(book), &lines, NEW_LINE)
}

/// One section per code book the request kind uses, skipping absent ones.
pub fn code_book_sections(snapshot: &ReferenceSnapshot, kind: RequestKind) -> Vec<PromptSection> {
    kind.code_books()
        .iter()
        .filter_map(|book| code_book_section(snapshot, *book))
        .collect()
}

pub fn image_section(image_urls: &[String]) -> Option<PromptSection> {
    PromptSection::list(
        "For imageUrl and thumbnailUrl, select from the following list:",
        image_urls,
        NEW_LINE,
    )
}

pub fn completeness_section() -> PromptSection {
    PromptSection::fixed(
        "Ensure every recipe is complete with:",
        &[
            "A meaningful title and summary.",
            "Calories and nutritional information filled with realistic values.",
            "Step-by-step instructions grouped logically.",
            "Ingredient groups clearly labeled.",
        ],
    )
}

pub const CLOSING_HEADING: &str = "Output rules:";

/// Formatting rules plus the two instructions for declining a request.
pub fn closing_section(kind: RequestKind) -> PromptSection {
    let (nonsense, conflict) = match kind {
        RequestKind::Recipe => (
            "If the ingredients provided are nonsense, set success to false and explain why in reasonForFail.",
            "If the ingredient list contains items from the allergies and dietary restrictions, set success to false and explain why in reasonForFail.",
        ),
        RequestKind::MealPlan => (
            "If the goal or dietary preferences provided are nonsense, set success to false and explain why in reasonForFail.",
            "If the goal or dietary preferences conflict with the allergies and dietary restrictions, set success to false and explain why in reasonForFail.",
        ),
    };

    PromptSection::fixed(
        CLOSING_HEADING,
        &[
            "Respond with the JSON result only. Do not include any explanation, prose or markdown.",
            "Do not include comments in the JSON.",
            "The JSON must be valid and strictly deserializable into the schema above.",
            nonsense,
            conflict,
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{Category, CodeValue};

    #[test]
    fn test_list_omits_empty() {
        let empty: Vec<String> = vec![];
        assert!(PromptSection::list("Heading:", &empty, COMMA_SEPARATOR).is_none());
        assert!(PromptSection::list("Heading:", &["  ", ""], COMMA_SEPARATOR).is_none());
    }

    #[test]
    fn test_list_render() {
        let section =
            PromptSection::list("Ingredients:", &["chicken", " rice "], COMMA_SEPARATOR).unwrap();
        assert_eq!(section.render(), "Ingredients:\nchicken, rice");
    }

    #[test]
    fn test_render_sections_joins_with_blank_line() {
        let sections = vec![
            PromptSection::fixed("A", &["1", "2"]),
            PromptSection::fixed("B", &[]),
        ];
        assert_eq!(render_sections(&sections), "A\n1\n2\n\nB");
    }

    #[test]
    fn test_category_and_code_lines() {
        let snapshot = ReferenceSnapshot::new(vec![Category {
            id: 4,
            name: "Dessert".to_string(),
        }])
        .with_code_book(
            CodeBook::TimeUnit,
            vec![CodeValue {
                code: 1,
                description: "Minutes".to_string(),
            }],
        );

        let categories = category_section(&snapshot).unwrap();
        assert_eq!(categories.lines, vec!["4: Dessert"]);

        let time = code_book_section(&snapshot, CodeBook::TimeUnit).unwrap();
        assert_eq!(time.lines, vec!["1: Minutes"]);
        assert!(code_book_section(&snapshot, CodeBook::DaysOfWeek).is_none());
    }
}
