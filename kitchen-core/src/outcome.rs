//! Classified results of a recommendation call.

use serde::Serialize;

use crate::llm::LlmError;

/// Exactly one of these is produced per recommendation call.
#[derive(Debug)]
pub enum CompletionOutcome<T> {
    /// The model returned a payload that decoded and validated.
    Success(T),
    /// The model declined, judging the request's inputs invalid.
    DomainRefusal(String),
    /// The model's text did not match the output contract.
    MalformedOutput { raw: String, detail: String },
    /// The completion endpoint could not be reached or answered with an error.
    TransportFailure(LlmError),
}

/// How a failed outcome should be surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// User-correctable: change the request and try again.
    Validation,
    /// The model broke the output contract.
    Generation,
    /// The completion service was unreachable.
    ServiceUnavailable,
}

impl ErrorClass {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorClass::Validation => 422,
            ErrorClass::Generation => 502,
            ErrorClass::ServiceUnavailable => 503,
        }
    }
}

const GENERATION_FAILED: &str =
    "The recommendation could not be generated from the model's response.";
const SERVICE_UNAVAILABLE: &str = "The recommendation service is currently unavailable.";

/// Caller-facing body: a success flag, an optional reason, and the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult<T> {
    pub success: bool,
    pub reason_for_fail: Option<String>,
    pub payload: Option<T>,
}

impl<T> CompletionOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionOutcome::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CompletionOutcome<U> {
        match self {
            CompletionOutcome::Success(payload) => CompletionOutcome::Success(f(payload)),
            CompletionOutcome::DomainRefusal(reason) => CompletionOutcome::DomainRefusal(reason),
            CompletionOutcome::MalformedOutput { raw, detail } => {
                CompletionOutcome::MalformedOutput { raw, detail }
            }
            CompletionOutcome::TransportFailure(e) => CompletionOutcome::TransportFailure(e),
        }
    }

    /// `None` on success.
    pub fn error_class(&self) -> Option<ErrorClass> {
        match self {
            CompletionOutcome::Success(_) => None,
            CompletionOutcome::DomainRefusal(_) => Some(ErrorClass::Validation),
            CompletionOutcome::MalformedOutput { .. } => Some(ErrorClass::Generation),
            CompletionOutcome::TransportFailure(_) => Some(ErrorClass::ServiceUnavailable),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.error_class().map_or(200, |class| class.status_code())
    }

    /// Convert to the caller-facing body. Only refusals expose the model's
    /// reason; system failures get a generic message.
    pub fn into_result(self) -> RecommendationResult<T> {
        match self {
            CompletionOutcome::Success(payload) => RecommendationResult {
                success: true,
                reason_for_fail: None,
                payload: Some(payload),
            },
            CompletionOutcome::DomainRefusal(reason) => RecommendationResult {
                success: false,
                reason_for_fail: Some(reason),
                payload: None,
            },
            CompletionOutcome::MalformedOutput { .. } => RecommendationResult {
                success: false,
                reason_for_fail: Some(GENERATION_FAILED.to_string()),
                payload: None,
            },
            CompletionOutcome::TransportFailure(_) => RecommendationResult {
                success: false,
                reason_for_fail: Some(SERVICE_UNAVAILABLE.to_string()),
                payload: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CompletionOutcome::Success(1).status_code(), 200);
        assert_eq!(
            CompletionOutcome::<()>::DomainRefusal("no".to_string()).status_code(),
            422
        );
        assert_eq!(
            CompletionOutcome::<()>::MalformedOutput {
                raw: "x".to_string(),
                detail: "bad".to_string()
            }
            .status_code(),
            502
        );
        assert_eq!(
            CompletionOutcome::<()>::TransportFailure(LlmError::Timeout("slow".to_string()))
                .status_code(),
            503
        );
    }

    #[test]
    fn test_refusal_reason_reaches_caller() {
        let result = CompletionOutcome::<()>::DomainRefusal("contains dairy".to_string())
            .into_result();
        assert!(!result.success);
        assert_eq!(result.reason_for_fail.as_deref(), Some("contains dairy"));
        assert!(result.payload.is_none());
    }

    #[test]
    fn test_malformed_output_hides_raw_text() {
        let result = CompletionOutcome::<()>::MalformedOutput {
            raw: "secret model text".to_string(),
            detail: "bad json".to_string(),
        }
        .into_result();
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("secret model text"));
        assert!(json.contains("\"success\":false"));
    }

    #[test]
    fn test_map_preserves_variant() {
        let outcome = CompletionOutcome::Success(2).map(|n| n * 10);
        assert!(matches!(outcome, CompletionOutcome::Success(20)));

        let outcome = CompletionOutcome::<i32>::DomainRefusal("r".to_string()).map(|n| n * 10);
        assert!(matches!(outcome, CompletionOutcome::DomainRefusal(ref r) if r == "r"));
    }
}
