//! Outbound webhook calls and per-platform response classification.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::external::HTTP_CLIENT;
use crate::services::notify::RenderedRequest;

/// One outbound request as handed to a [`WebhookTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    pub method: String,
    pub url: String,
    pub content_type: String,
    pub body: String,
    pub timeout: Duration,
}

impl WebhookRequest {
    pub fn from_rendered(rendered: &RenderedRequest, timeout: Duration) -> Self {
        Self {
            method: rendered.method.clone(),
            url: rendered.url.clone(),
            content_type: rendered.content_type.clone(),
            body: rendered.body.clone(),
            timeout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

/// Performs the HTTP exchange. An `Err` means no response was obtained.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn execute(&self, request: &WebhookRequest) -> anyhow::Result<WebhookResponse>;
}

/// Transport backed by the shared [`HTTP_CLIENT`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

#[async_trait]
impl WebhookTransport for HttpTransport {
    async fn execute(&self, request: &WebhookRequest) -> anyhow::Result<WebhookResponse> {
        let method = Method::from_bytes(request.method.to_ascii_uppercase().as_bytes())?;

        let response = HTTP_CLIENT
            .request(method, &request.url)
            .header(CONTENT_TYPE, &request.content_type)
            .body(request.body.clone())
            .timeout(request.timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(WebhookResponse { status, body })
    }
}

/// Result of a single dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub success: bool,
    pub error: Option<String>,
    /// Response body, or the transport error text when no response arrived.
    pub response_body: String,
    pub cost_ms: i64,
}

/// Sends one rendered request and classifies the outcome. Never fails:
/// transport errors become unsuccessful results.
pub async fn dispatch(
    transport: &dyn WebhookTransport,
    rendered: &RenderedRequest,
    timeout: Duration,
) -> DispatchResult {
    let request = WebhookRequest::from_rendered(rendered, timeout);
    let started = Instant::now();
    let outcome = transport.execute(&request).await;
    let cost_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);

    match outcome {
        Ok(response) => {
            let error = classify_response(response.status, &response.body).err();
            DispatchResult {
                success: error.is_none(),
                error,
                response_body: response.body,
                cost_ms,
            }
        }
        Err(e) => {
            let text = format!("{:#}", e);
            tracing::warn!(url = %request.url, error = %text, "Webhook request failed");
            DispatchResult {
                success: false,
                error: Some(text.clone()),
                response_body: text,
                cost_ms,
            }
        }
    }
}

/// Decides whether a webhook response means the message was delivered.
///
/// Anything but HTTP 200 fails. A 200 whose body is a JSON object fails when
/// it carries a non-zero `code` (Feishu style, error text from `msg`) or a
/// non-zero `errcode` (WeCom / DingTalk style, error text from `errmsg`).
/// Bodies that are not JSON objects count as delivered.
pub fn classify_response(status: u16, body: &str) -> Result<(), String> {
    if status != 200 {
        return Err(format!("HTTP {}", status));
    }

    let Ok(Value::Object(json)) = serde_json::from_str::<Value>(body) else {
        return Ok(());
    };

    let failure_text = |message_field: &str| match json.get(message_field) {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => Value::Object(json.clone()).to_string(),
    };

    if json.get("code").is_some_and(|code| !is_zero(code)) {
        return Err(failure_text("msg"));
    }
    if json.get("errcode").is_some_and(|code| !is_zero(code)) {
        return Err(failure_text("errmsg"));
    }
    Ok(())
}

fn is_zero(value: &Value) -> bool {
    value.as_f64().is_some_and(|n| n == 0.0)
}
