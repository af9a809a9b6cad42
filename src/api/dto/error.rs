//! Error response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "QUOTA_EXCEEDED",
    "message": "Daily limit reached (100 calls)",
    "details": { "daily_limit": 100 },
    "request_id": "0b9c5a56-5bb1-4d7e-a5c5-2a6f0c2d9e11"
}))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<JsonValue>,
    /// Correlates with the `x-request-id` response header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_skipped() {
        let body = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "missing")).unwrap();
        assert_eq!(body, json!({ "code": "NOT_FOUND", "message": "missing" }));
    }

    #[test]
    fn test_builder_sets_details_and_request_id() {
        let response = ErrorResponse::new("BAD_REQUEST", "bad")
            .with_details(json!({ "field": "title" }))
            .with_request_id("req-1");

        assert_eq!(response.details, Some(json!({ "field": "title" })));
        assert_eq!(response.request_id.as_deref(), Some("req-1"));
    }
}
