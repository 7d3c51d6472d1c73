//! Reference data consumed by the recommendation pipeline.
//!
//! Categories and code books live in the main application's database. The
//! pipeline reads them through [`ReferenceDataProvider`] and works on a
//! [`ReferenceSnapshot`] taken at the start of each request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ReferenceError;
use crate::types::RequestKind;

/// Identifier of a code book in the reference store.
pub type CodeBookId = i32;

/// The code books the pipeline knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CodeBook {
    TimeUnit,
    DaysOfWeek,
    NonRecipeSubstitution,
}

impl CodeBook {
    pub const fn id(&self) -> CodeBookId {
        match self {
            CodeBook::TimeUnit => 1,
            CodeBook::DaysOfWeek => 2,
            CodeBook::NonRecipeSubstitution => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeBook::TimeUnit => "time_unit",
            CodeBook::DaysOfWeek => "days_of_week",
            CodeBook::NonRecipeSubstitution => "non_recipe_substitution",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeValue {
    pub code: i32,
    pub description: String,
}

/// Read access to categories and code books.
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    /// All categories, in the provider's stable order.
    async fn list_categories(&self) -> Vec<Category>;

    /// Values of a code book, or `None` if the code book does not exist.
    async fn list_code_values(&self, code_book_id: CodeBookId) -> Option<Vec<CodeValue>>;
}

/// Point-in-time copy of the reference data one request needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSnapshot {
    pub categories: Vec<Category>,
    code_books: BTreeMap<CodeBook, Vec<CodeValue>>,
}

impl ReferenceSnapshot {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            code_books: BTreeMap::new(),
        }
    }

    /// Fetch categories and the code books used by `kind`. Unknown code books
    /// are left out of the snapshot.
    pub async fn capture(provider: &dyn ReferenceDataProvider, kind: RequestKind) -> Self {
        let categories = provider.list_categories().await;

        let mut code_books = BTreeMap::new();
        for book in kind.code_books() {
            match provider.list_code_values(book.id()).await {
                Some(values) => {
                    code_books.insert(*book, values);
                }
                None => {
                    tracing::debug!(code_book = book.as_str(), "code book not found");
                }
            }
        }

        Self {
            categories,
            code_books,
        }
    }

    pub fn with_code_book(mut self, book: CodeBook, values: Vec<CodeValue>) -> Self {
        self.code_books.insert(book, values);
        self
    }

    pub fn code_values(&self, book: CodeBook) -> Option<&[CodeValue]> {
        self.code_books.get(&book).map(Vec::as_slice)
    }

    pub fn has_category(&self, id: i32) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    /// Whether `code` is valid for `book`. A code book missing from the
    /// snapshot cannot be checked, so any code is accepted.
    pub fn accepts_code(&self, book: CodeBook, code: i32) -> bool {
        match self.code_values(book) {
            Some(values) => values.iter().any(|v| v.code == code),
            None => true,
        }
    }
}

/// In-memory reference data, loadable from a JSON file.
///
/// ```json
/// {
///   "categories": [{"id": 1, "name": "Breakfast"}],
///   "codeBooks": {"1": [{"code": 1, "description": "Minutes"}]}
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticReferenceData {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    code_books: BTreeMap<CodeBookId, Vec<CodeValue>>,
}

impl StaticReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ReferenceError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn with_category(mut self, id: i32, name: &str) -> Self {
        self.categories.push(Category {
            id,
            name: name.to_string(),
        });
        self
    }

    pub fn with_code_book(mut self, code_book_id: CodeBookId, values: &[(i32, &str)]) -> Self {
        let values = values
            .iter()
            .map(|(code, description)| CodeValue {
                code: *code,
                description: description.to_string(),
            })
            .collect();
        self.code_books.insert(code_book_id, values);
        self
    }
}

#[async_trait]
impl ReferenceDataProvider for StaticReferenceData {
    async fn list_categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    async fn list_code_values(&self, code_book_id: CodeBookId) -> Option<Vec<CodeValue>> {
        self.code_books.get(&code_book_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> StaticReferenceData {
        StaticReferenceData::new()
            .with_category(3, "Dinner")
            .with_category(1, "Breakfast")
            .with_code_book(CodeBook::TimeUnit.id(), &[(1, "Minutes"), (2, "Hours")])
            .with_code_book(CodeBook::DaysOfWeek.id(), &[(1, "Monday")])
    }

    #[tokio::test]
    async fn test_capture_keeps_provider_order() {
        let snapshot = ReferenceSnapshot::capture(&reference(), RequestKind::Recipe).await;
        let ids: Vec<i32> = snapshot.categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn test_capture_only_needed_code_books() {
        let snapshot = ReferenceSnapshot::capture(&reference(), RequestKind::Recipe).await;
        assert!(snapshot.code_values(CodeBook::TimeUnit).is_some());
        assert!(snapshot.code_values(CodeBook::DaysOfWeek).is_none());
    }

    #[tokio::test]
    async fn test_capture_skips_unknown_code_book() {
        let snapshot = ReferenceSnapshot::capture(&reference(), RequestKind::MealPlan).await;
        assert!(snapshot.code_values(CodeBook::DaysOfWeek).is_some());
        assert!(snapshot
            .code_values(CodeBook::NonRecipeSubstitution)
            .is_none());
    }

    #[test]
    fn test_accepts_code() {
        let snapshot = ReferenceSnapshot::default().with_code_book(
            CodeBook::TimeUnit,
            vec![CodeValue {
                code: 1,
                description: "Minutes".to_string(),
            }],
        );
        assert!(snapshot.accepts_code(CodeBook::TimeUnit, 1));
        assert!(!snapshot.accepts_code(CodeBook::TimeUnit, 9));
        // Missing code book: nothing to check against.
        assert!(snapshot.accepts_code(CodeBook::DaysOfWeek, 42));
    }

    #[test]
    fn test_parse_reference_json() {
        let json = r#"{
            "categories": [{"id": 1, "name": "Breakfast"}],
            "codeBooks": {"1": [{"code": 1, "description": "Minutes"}]}
        }"#;
        let data: StaticReferenceData = serde_json::from_str(json).unwrap();
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.code_books[&1][0].description, "Minutes");
    }
}
