//! Error handler for converting AppError to HTTP responses.
//!
//! Every error leaves the API as an [`ErrorResponse`] JSON body. Handler
//! errors go through `IntoResponse for AppError`; framework rejections and
//! fallbacks are rewritten by [`global_error_handler`], which also stamps the
//! request id onto the body.

use axum::{
    Json,
    body::{Body, Bytes, to_bytes},
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

impl AppError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Duplicate { .. } => StatusCode::CONFLICT,
            AppError::Validation { .. }
            | AppError::ValidationErrors { .. }
            | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } | AppError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::NoAvailableChannel => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::new("NOT_FOUND", format!("{} not found", entity))
                .with_details(json!({ "entity": entity, "field": field, "value": value })),
            AppError::Duplicate {
                entity,
                field,
                value,
            } => ErrorResponse::new("DUPLICATE", format!("{}.{} already exists", entity, field))
                .with_details(json!({ "entity": entity, "field": field, "value": value })),
            AppError::Validation { field, reason } => {
                ErrorResponse::new("VALIDATION_ERROR", reason.as_str())
                    .with_details(json!({ "field": field }))
            }
            AppError::ValidationErrors { errors } => {
                let fields: Vec<_> = errors
                    .iter()
                    .map(|e| json!({ "field": e.field, "message": e.message }))
                    .collect();
                ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                    .with_details(json!({ "errors": fields }))
            }
            AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message.as_str()),
            AppError::Unauthorized { message } => {
                ErrorResponse::new("UNAUTHORIZED", message.as_str())
            }
            AppError::Forbidden { message } => ErrorResponse::new("FORBIDDEN", message.as_str()),
            AppError::InvalidApiKey => ErrorResponse::new("INVALID_API_KEY", self.to_string()),
            AppError::QuotaExceeded { daily_limit } => {
                ErrorResponse::new("QUOTA_EXCEEDED", self.to_string())
                    .with_details(json!({ "daily_limit": daily_limit }))
            }
            AppError::NoAvailableChannel => {
                ErrorResponse::new("NO_AVAILABLE_CHANNEL", self.to_string())
            }
            AppError::Database { operation, .. } => {
                ErrorResponse::new("DATABASE_ERROR", "Database operation failed")
                    .with_details(json!({ "operation": operation }))
            }
            AppError::Configuration { key, .. } => {
                ErrorResponse::new("CONFIGURATION_ERROR", "Server misconfiguration")
                    .with_details(json!({ "key": key }))
            }
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
            }
            AppError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

fn fallback_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::REQUEST_TIMEOUT => "REQUEST_TIMEOUT",
        StatusCode::SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
        s if s.is_server_error() => "INTERNAL_SERVER_ERROR",
        _ => "UNKNOWN_ERROR",
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

fn wrap_plain_body(status: StatusCode, body: &Bytes) -> ErrorResponse {
    let original = String::from_utf8_lossy(body).trim().to_string();
    let message = if original.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        original
    };
    ErrorResponse::new(fallback_code(status), message)
}

/// Rewrites every 4xx/5xx response into an [`ErrorResponse`] carrying the
/// request id. JSON bodies of another shape (the health report) pass through.
///
/// Must run inside `request_id_middleware`.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().cloned();
    let response = next.run(request).await;

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let was_json = is_json(&response);
    let (mut parts, body) = response.into_parts();
    let bytes = to_bytes(body, MAX_ERROR_BODY_BYTES)
        .await
        .unwrap_or_default();

    let mut error_response = if was_json {
        match serde_json::from_slice::<ErrorResponse>(&bytes) {
            Ok(existing) => existing,
            Err(_) => return Response::from_parts(parts, Body::from(bytes)),
        }
    } else {
        wrap_plain_body(status, &bytes)
    };
    if let Some(id) = request_id {
        error_response = error_response.with_request_id(id.as_str());
    }

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_TYPE);
    (parts, Json(error_response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::request_id_middleware;
    use crate::error::ValidationFieldError;
    use axum::{Router, body::Body, middleware, routing::get};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_notify_rejections_status_codes() {
        assert_eq!(AppError::InvalidApiKey.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::QuotaExceeded { daily_limit: 5 }.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::NoAvailableChannel.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::ConnectionPool {
                source: anyhow::anyhow!("timed out")
            }
            .status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_validation_errors_body() {
        let err = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "key_name".to_string(),
                message: "Key name must be 1-50 characters".to_string(),
            }],
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["errors"][0]["field"], "key_name");
    }

    #[tokio::test]
    async fn test_internal_error_hides_source() {
        let err = AppError::Internal {
            source: anyhow::anyhow!("password=hunter2"),
        };
        let body = body_json(err.into_response()).await;
        assert_eq!(body["message"], "An internal error occurred");
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/quota",
                get(|| async { Err::<(), _>(AppError::QuotaExceeded { daily_limit: 3 }) }),
            )
            .route(
                "/plain",
                get(|| async { (StatusCode::BAD_REQUEST, "missing field `title`") }),
            )
            .layer(middleware::from_fn(global_error_handler))
            .layer(middleware::from_fn(request_id_middleware))
    }

    #[tokio::test]
    async fn test_global_handler_stamps_request_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/quota")
                    .header("x-request-id", "req-7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = body_json(response).await;
        assert_eq!(body["code"], "QUOTA_EXCEEDED");
        assert_eq!(body["details"]["daily_limit"], 3);
        assert_eq!(body["request_id"], "req-7");
    }

    #[tokio::test]
    async fn test_global_handler_wraps_plain_text() {
        let response = app()
            .oneshot(Request::builder().uri("/plain").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "missing field `title`");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_global_handler_unknown_route() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "Not Found");
    }
}
