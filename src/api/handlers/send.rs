//! Public send endpoint.
//!
//! Callers authenticate with the API key in the path; no user header needed.

use axum::{
    Json,
    body::Bytes,
    extract::{Form, FromRequest, Path, Query, Request, State},
    http::header,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::SEND_TAG;
use crate::api::dto::{ErrorResponse, SendParams, SendResponse};
use crate::api::middleware::ClientIp;
use crate::error::{AppError, AppResult};
use crate::services::notify::{DEFAULT_MSG_TYPE, SendRequest};
use crate::state::AppState;

/// Creates the send routes.
///
/// Routes:
/// - GET  /{api_key}           - Send with query parameters
/// - POST /{api_key}           - Send with query, form or JSON parameters
/// - GET  /{api_key}/{content} - Send the path segment as content
pub fn send_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(send_by_query, send_by_body))
        .routes(routes!(send_path_content))
}

/// Reads send parameters from a form or JSON body. Other content types, and
/// an empty JSON body, yield no parameters.
async fn body_params(request: Request) -> AppResult<SendParams> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(params) = Form::<SendParams>::from_request(request, &()).await?;
        return Ok(params);
    }

    if content_type.contains("json") {
        let bytes = Bytes::from_request(request, &())
            .await
            .map_err(|e| AppError::BadRequest {
                message: e.body_text(),
            })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(SendParams::default());
        }
        return serde_json::from_slice(&bytes).map_err(|e| AppError::BadRequest {
            message: format!("Invalid JSON body: {}", e),
        });
    }

    Ok(SendParams::default())
}

async fn send(state: &AppState, request: SendRequest) -> AppResult<Json<SendResponse>> {
    let outcome = state.services.sender.send(request).await?;
    Ok(Json(SendResponse::from(outcome)))
}

/// GET /notify/send/{api_key} - Send a notification
#[utoipa::path(
    get,
    path = "/{api_key}",
    tag = SEND_TAG,
    params(
        ("api_key" = String, Path, description = "API key issued to the caller")
    ),
    responses(
        (status = 200, description = "Dispatch outcome; `code` is 500 when every channel failed", body = SendResponse),
        (status = 400, description = "Empty message or malformed parameters", body = ErrorResponse),
        (status = 401, description = "Invalid, disabled or expired key", body = ErrorResponse),
        (status = 422, description = "No available channel", body = ErrorResponse),
        (status = 429, description = "Daily quota exhausted", body = ErrorResponse)
    )
)]
async fn send_by_query(
    State(state): State<AppState>,
    Path(api_key): Path<String>,
    ClientIp(ip): ClientIp,
    Query(params): Query<SendParams>,
) -> AppResult<Json<SendResponse>> {
    let request = params.into_send_request(api_key, ip)?;
    send(&state, request).await
}

/// POST /notify/send/{api_key} - Send a notification
///
/// Parameters may come from the query string, a form body or a JSON body;
/// the query string takes precedence.
#[utoipa::path(
    post,
    path = "/{api_key}",
    tag = SEND_TAG,
    params(
        ("api_key" = String, Path, description = "API key issued to the caller")
    ),
    request_body(
        content = SendParams,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Dispatch outcome; `code` is 500 when every channel failed", body = SendResponse),
        (status = 400, description = "Empty message or malformed parameters", body = ErrorResponse),
        (status = 401, description = "Invalid, disabled or expired key", body = ErrorResponse),
        (status = 422, description = "No available channel", body = ErrorResponse),
        (status = 429, description = "Daily quota exhausted", body = ErrorResponse)
    )
)]
async fn send_by_body(
    State(state): State<AppState>,
    Path(api_key): Path<String>,
    ClientIp(ip): ClientIp,
    Query(query): Query<SendParams>,
    request: Request,
) -> AppResult<Json<SendResponse>> {
    let body = body_params(request).await?;
    let request = query.or(body).into_send_request(api_key, ip)?;
    send(&state, request).await
}

/// GET /notify/send/{api_key}/{content} - Send the path segment as the message
#[utoipa::path(
    get,
    path = "/{api_key}/{content}",
    tag = SEND_TAG,
    params(
        ("api_key" = String, Path, description = "API key issued to the caller"),
        ("content" = String, Path, description = "Message content")
    ),
    responses(
        (status = 200, description = "Dispatch outcome; `code` is 500 when every channel failed", body = SendResponse),
        (status = 401, description = "Invalid, disabled or expired key", body = ErrorResponse),
        (status = 422, description = "No available channel", body = ErrorResponse),
        (status = 429, description = "Daily quota exhausted", body = ErrorResponse)
    )
)]
async fn send_path_content(
    State(state): State<AppState>,
    Path((api_key, content)): Path<(String, String)>,
    ClientIp(ip): ClientIp,
) -> AppResult<Json<SendResponse>> {
    let request = SendRequest {
        api_key,
        title: String::new(),
        content,
        msg_type: DEFAULT_MSG_TYPE.to_string(),
        channel_id: None,
        ip_address: ip,
    };
    send(&state, request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::IdParam;
    use axum::body::Body;
    use axum::http::Method;

    fn post(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method(Method::POST).uri("/notify/send/k");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_json_body() {
        let params = body_params(post(
            Some("application/json; charset=utf-8"),
            r#"{"title":"t","desp":"d","channel_id":3}"#,
        ))
        .await
        .unwrap();

        assert_eq!(params.title.as_deref(), Some("t"));
        assert_eq!(params.desp.as_deref(), Some("d"));
        assert_eq!(params.channel_id, Some(IdParam::Num(3)));
    }

    #[tokio::test]
    async fn test_form_body() {
        let params = body_params(post(
            Some("application/x-www-form-urlencoded"),
            "text=hello%20world&channel_id=8",
        ))
        .await
        .unwrap();

        assert_eq!(params.text.as_deref(), Some("hello world"));
        assert_eq!(params.channel_id, Some(IdParam::Text("8".to_string())));
    }

    #[tokio::test]
    async fn test_empty_json_body_is_no_params() {
        let params = body_params(post(Some("application/json"), "  "))
            .await
            .unwrap();
        assert!(params.title.is_none());
        assert!(params.content.is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let err = body_params(post(Some("application/json"), "{not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_other_content_type_ignored() {
        let params = body_params(post(Some("text/plain"), "title=x")).await.unwrap();
        assert!(params.title.is_none());

        let params = body_params(post(None, "")).await.unwrap();
        assert!(params.title.is_none());
    }
}
