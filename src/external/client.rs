use std::sync::LazyLock;
use std::time::Duration;

use reqwest::redirect::Policy;

/// Ceiling for any webhook call; dispatch applies the configured per-request
/// timeout underneath it.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(120);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 3;

/// Shared client for outbound webhook calls.
///
/// Built on first use so every dispatch and channel test reuses one
/// connection pool.
///
/// # Example
/// ```ignore
/// use crate::external::HTTP_CLIENT;
///
/// let response = HTTP_CLIENT
///     .post("https://open.feishu.cn/open-apis/bot/v2/hook/xxx")
///     .header("Content-Type", "application/json")
///     .body(r#"{"msg_type":"text","content":{"text":"hi"}}"#)
///     .send()
///     .await?;
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    build_webhook_client().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build webhook client, using defaults");
        reqwest::Client::new()
    })
});

/// Builds the webhook client.
///
/// Webhook endpoints answer small JSON bodies, so idle connections are kept
/// briefly and redirects are capped.
pub fn build_webhook_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(CLIENT_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(60))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_client_builds() {
        assert!(build_webhook_client().is_ok());
    }
}
