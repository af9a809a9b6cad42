//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, Level, info, span, warn};

use super::RequestId;

const SEND_PATH_PREFIX: &str = "/notify/send/";

/// Strips the API key and inline content from public send paths.
fn redact_path(path: &str) -> String {
    match path.strip_prefix(SEND_PATH_PREFIX) {
        Some(_) => format!("{}***", SEND_PATH_PREFIX),
        None => path.to_string(),
    }
}

/// Logs each request and its response status inside an `http_request` span.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = redact_path(request.uri().path());
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = span!(
        Level::INFO,
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
        user_id = tracing::field::Empty
    );

    async move {
        info!("Request received");

        let start = Instant::now();
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let status = response.status();
        if status.is_server_error() {
            warn!(status = status.as_u16(), duration_ms, "Response sent");
        } else {
            info!(status = status.as_u16(), duration_ms, "Response sent");
        }

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_paths_are_redacted() {
        assert_eq!(redact_path("/notify/send/abcdef"), "/notify/send/***");
        assert_eq!(
            redact_path("/notify/send/abcdef/disk%20full"),
            "/notify/send/***"
        );
        assert_eq!(redact_path("/api/notify/keys"), "/api/notify/keys");
    }
}
