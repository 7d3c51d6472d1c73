use thiserror::Error;
use validator::ValidationErrors;

/// Why a completion could not be accepted as a recommendation payload.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Payload failed validation: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Category id {0} appears more than once")]
    DuplicateCategory(i32),

    #[error("Unknown category id: {0}")]
    UnknownCategory(i32),

    #[error("Unknown code {code} for {field}")]
    UnknownCode { field: &'static str, code: i32 },

    #[error("Day {day} has neither a recipe nor a substitute for {meal}")]
    EmptyMealSlot { day: i32, meal: &'static str },

    #[error("Weekday code {0} appears more than once")]
    DuplicateWeekday(i32),
}

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Failed to read reference data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid reference data: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
