use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{NotifyChannel, NotifyPlatform};
use crate::services::notify::audit::{AttemptRecord, LogContext, build_log};
use crate::services::notify::{
    NotifyStore, SendCommit, WebhookTransport, check_quota, dispatch, render_request,
    resolve_channels, validate_api_key,
};
use crate::utils::clock::Clock;

pub const DEFAULT_MSG_TYPE: &str = "text";
const TEST_TITLE: &str = "Test notification";

/// A send call as received from the public endpoint.
#[derive(Debug, Clone, Default)]
pub struct SendRequest {
    pub api_key: String,
    pub title: String,
    pub content: String,
    pub msg_type: String,
    pub channel_id: Option<i64>,
    pub ip_address: Option<String>,
}

/// Result of dispatching to one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChannelSendOutcome {
    pub success: bool,
    pub channel_id: i64,
    pub channel_name: String,
    /// Empty when the channel's platform no longer exists
    pub platform_name: String,
    pub error: Option<String>,
    pub cost_ms: i64,
}

/// Aggregate result of a send call; successful iff any channel succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SendOutcome {
    pub success: bool,
    pub total: usize,
    pub success_count: usize,
    pub fail_count: usize,
    pub results: Vec<ChannelSendOutcome>,
}

impl SendOutcome {
    pub fn from_results(results: Vec<ChannelSendOutcome>) -> Self {
        let success_count = results.iter().filter(|r| r.success).count();
        let total = results.len();
        Self {
            success: success_count > 0,
            total,
            success_count,
            fail_count: total - success_count,
            results,
        }
    }
}

/// Result of a channel connectivity test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChannelTestOutcome {
    pub success: bool,
    pub message: String,
    pub cost_ms: i64,
}

/// Validates the caller's key, enforces its quota, fans the message out to the
/// resolved channels and commits usage plus one log row per attempt.
///
/// Rejections (empty message, invalid key, quota, no channel) happen before
/// any side effect. Per-channel failures are reported in the outcome and never
/// abort the remaining channels; store errors abort the call with nothing
/// committed.
#[derive(Clone)]
pub struct NotifySendService {
    store: Arc<dyn NotifyStore>,
    transport: Arc<dyn WebhookTransport>,
    clock: Arc<dyn Clock>,
    send_timeout: Duration,
    test_timeout: Duration,
}

impl NotifySendService {
    pub fn new(
        store: Arc<dyn NotifyStore>,
        transport: Arc<dyn WebhookTransport>,
        clock: Arc<dyn Clock>,
        send_timeout: Duration,
        test_timeout: Duration,
    ) -> Self {
        Self {
            store,
            transport,
            clock,
            send_timeout,
            test_timeout,
        }
    }

    pub async fn send(&self, request: SendRequest) -> AppResult<SendOutcome> {
        if request.title.is_empty() && request.content.is_empty() {
            return Err(AppError::BadRequest {
                message: "Message title and content cannot both be empty".to_string(),
            });
        }

        let now = self.clock.now();
        let key = validate_api_key(self.store.as_ref(), &request.api_key, now).await?;
        let usage = check_quota(&key, self.clock.today(), now)?;

        let channels = resolve_channels(self.store.as_ref(), &key, request.channel_id).await?;
        if channels.is_empty() {
            tracing::info!(key_id = key.key_id, channel_id = ?request.channel_id, "No channel resolved");
            return Err(AppError::NoAvailableChannel);
        }

        let msg_type = if request.msg_type.is_empty() {
            DEFAULT_MSG_TYPE
        } else {
            request.msg_type.as_str()
        };
        let ctx = LogContext {
            key: &key,
            title: &request.title,
            content: &request.content,
            msg_type,
            ip_address: request.ip_address.as_deref(),
        };

        let mut results = Vec::with_capacity(channels.len());
        let mut logs = Vec::with_capacity(channels.len());
        let mut succeeded_channel_ids = Vec::new();

        for channel in &channels {
            let platform = self.store.find_platform(channel.platform_id).await?;
            let sent_at = self.clock.now();

            let (outcome, attempt_body, response_body) = match &platform {
                Some(platform) => {
                    let rendered =
                        render_request(platform, channel, &request.title, &request.content);
                    let result =
                        dispatch(self.transport.as_ref(), &rendered, self.send_timeout).await;
                    let outcome = ChannelSendOutcome {
                        success: result.success,
                        channel_id: channel.channel_id,
                        channel_name: channel.channel_name.clone(),
                        platform_name: platform.platform_name.clone(),
                        error: result.error,
                        cost_ms: result.cost_ms,
                    };
                    (outcome, rendered.body, result.response_body)
                }
                None => {
                    tracing::warn!(
                        channel_id = channel.channel_id,
                        platform_id = channel.platform_id,
                        "Channel references a missing platform"
                    );
                    let outcome = ChannelSendOutcome {
                        success: false,
                        channel_id: channel.channel_id,
                        channel_name: channel.channel_name.clone(),
                        platform_name: String::new(),
                        error: Some("Platform not found".to_string()),
                        cost_ms: 0,
                    };
                    (outcome, String::new(), String::new())
                }
            };

            logs.push(build_log(
                &ctx,
                &AttemptRecord {
                    channel,
                    request_body: &attempt_body,
                    response_body: &response_body,
                    success: outcome.success,
                    error: outcome.error.as_deref(),
                    sent_at,
                    cost_ms: outcome.cost_ms,
                },
            ));
            if outcome.success {
                succeeded_channel_ids.push(channel.channel_id);
            }
            results.push(outcome);
        }

        self.store
            .commit_send(SendCommit {
                usage,
                logs,
                succeeded_channel_ids,
            })
            .await?;

        let outcome = SendOutcome::from_results(results);
        tracing::info!(
            key_id = key.key_id,
            total = outcome.total,
            success_count = outcome.success_count,
            fail_count = outcome.fail_count,
            "Notification sent"
        );
        Ok(outcome)
    }

    /// Sends a fixed test message through one of the user's channels.
    ///
    /// Uses the same classification as a real send but writes no log and
    /// consumes no quota.
    pub async fn test_channel(&self, user_id: i64, channel_id: i64) -> AppResult<ChannelTestOutcome> {
        let channel = self
            .store
            .find_channel(channel_id)
            .await?
            .ok_or_else(|| AppError::not_found("notify_channel", channel_id))?;
        if channel.user_id != user_id {
            return Err(AppError::Forbidden {
                message: "You don't have permission to test this channel".to_string(),
            });
        }
        let platform = self
            .store
            .find_platform(channel.platform_id)
            .await?
            .ok_or_else(|| AppError::not_found("notify_platform", channel.platform_id))?;

        let content = self.test_message(&channel, &platform);
        let rendered = render_request(&platform, &channel, TEST_TITLE, &content);
        let result = dispatch(self.transport.as_ref(), &rendered, self.test_timeout).await;

        tracing::info!(
            channel_id,
            success = result.success,
            cost_ms = result.cost_ms,
            "Channel test finished"
        );

        Ok(ChannelTestOutcome {
            success: result.success,
            message: result
                .error
                .unwrap_or_else(|| "Test message delivered".to_string()),
            cost_ms: result.cost_ms,
        })
    }

    fn test_message(&self, channel: &NotifyChannel, platform: &NotifyPlatform) -> String {
        format!(
            "Channel: {}\nPlatform: {}\nTime: {}",
            channel.channel_name,
            platform.platform_name,
            self.clock.now().format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DefaultFlag, SendStatus};
    use crate::services::notify::memory::{
        MemoryNotifyStore, ScriptedTransport, reply, sample_channel, sample_key, sample_platform,
    };
    use crate::utils::clock::FixedClock;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn service(
        store: Arc<MemoryNotifyStore>,
        transport: Arc<ScriptedTransport>,
        now: NaiveDateTime,
    ) -> NotifySendService {
        NotifySendService::new(
            store,
            transport,
            Arc::new(FixedClock(now)),
            Duration::from_secs(30),
            Duration::from_secs(30),
        )
    }

    fn request(api_key: &str, title: &str, content: &str) -> SendRequest {
        SendRequest {
            api_key: api_key.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            msg_type: String::new(),
            channel_id: None,
            ip_address: Some("127.0.0.1".to_string()),
        }
    }

    fn seeded_store() -> Arc<MemoryNotifyStore> {
        let store = Arc::new(MemoryNotifyStore::default());
        store.insert_platform(sample_platform(1, "https://hook.example/{key}"));
        let mut key = sample_key(1, 7, "k1");
        key.last_reset_date = Some(at(10).date());
        store.insert_key(key);
        store
    }

    #[tokio::test]
    async fn test_partial_failure_fan_out() {
        let store = seeded_store();
        for id in [10, 11, 12] {
            store.insert_channel(sample_channel(id, 7, 1));
        }
        let transport = Arc::new(ScriptedTransport::new(vec![
            reply(200, r#"{"code":0}"#),
            reply(200, r#"{"errcode":90001,"errmsg":"invalid"}"#),
            reply(200, "ok"),
        ]));

        let outcome = service(store.clone(), transport.clone(), at(10))
            .send(request("k1", "Alert", "disk full"))
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.success_count, 2);
        assert_eq!(outcome.fail_count, 1);
        assert_eq!(outcome.results[1].error.as_deref(), Some("invalid"));
        assert_eq!(outcome.results[0].platform_name, "Platform 1");

        let logs = store.logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[1].status, SendStatus::Failed);
        assert_eq!(logs[0].msg_type.as_deref(), Some("text"));
        assert_eq!(store.channel(10).use_count, 1);
        assert_eq!(store.channel(11).use_count, 0);
        assert_eq!(store.channel(12).use_count, 1);
        assert_eq!(store.channel(11).last_used_time, None);

        let key = store.key(1);
        assert_eq!(key.daily_used, 1);
        assert_eq!(key.total_count, 1);
        assert_eq!(key.last_used_time, Some(at(10)));

        let sent = transport.requests();
        assert_eq!(sent[0].url, "https://hook.example/hook-10");
        assert_eq!(
            sent[0].body,
            r#"{"msg_type":"text","content":{"text":"Alert\ndisk full"}}"#
        );
    }

    #[tokio::test]
    async fn test_exhausted_quota_rejects_without_side_effects() {
        let store = seeded_store();
        store.update_key(1, |k| {
            k.daily_limit = 2;
            k.daily_used = 2;
        });
        store.insert_channel(sample_channel(10, 7, 1));
        let transport = Arc::new(ScriptedTransport::new(vec![]));

        let err = service(store.clone(), transport.clone(), at(10))
            .send(request("k1", "", "hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::QuotaExceeded { daily_limit: 2 }));
        assert!(store.logs().is_empty());
        assert_eq!(store.key(1).total_count, 0);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_new_day_resets_quota() {
        let store = seeded_store();
        store.update_key(1, |k| {
            k.daily_limit = 2;
            k.daily_used = 2;
        });
        store.insert_channel(sample_channel(10, 7, 1));
        let transport = Arc::new(ScriptedTransport::new(vec![reply(200, "")]));

        service(store.clone(), transport, at(11))
            .send(request("k1", "", "hi"))
            .await
            .unwrap();

        let key = store.key(1);
        assert_eq!(key.daily_used, 1);
        assert_eq!(key.last_reset_date, Some(at(11).date()));
        assert_eq!(key.total_count, 1);
    }

    /// Clock whose quota day is set apart from its time of day.
    struct QuotaDayClock {
        now: NaiveDateTime,
        today: NaiveDate,
    }

    impl Clock for QuotaDayClock {
        fn now(&self) -> NaiveDateTime {
            self.now
        }

        fn today(&self) -> NaiveDate {
            self.today
        }
    }

    #[tokio::test]
    async fn test_quota_day_comes_from_clock_today() {
        let store = seeded_store();
        store.update_key(1, |k| {
            k.daily_limit = 1;
            k.daily_used = 1;
        });
        store.insert_channel(sample_channel(10, 7, 1));
        let transport = Arc::new(ScriptedTransport::new(vec![reply(200, "")]));
        let clock = QuotaDayClock {
            now: at(10),
            today: at(11).date(),
        };
        let sender = NotifySendService::new(
            store.clone(),
            transport,
            Arc::new(clock),
            Duration::from_secs(30),
            Duration::from_secs(30),
        );

        sender.send(request("k1", "", "hi")).await.unwrap();

        let key = store.key(1);
        assert_eq!(key.daily_used, 1);
        assert_eq!(key.last_reset_date, Some(at(11).date()));
        assert_eq!(key.last_used_time, Some(at(10)));
    }

    #[tokio::test]
    async fn test_foreign_channel_has_no_available_channel() {
        let store = seeded_store();
        store.insert_channel(sample_channel(10, 8, 1));
        let transport = Arc::new(ScriptedTransport::new(vec![]));

        let mut req = request("k1", "", "hi");
        req.channel_id = Some(10);
        let err = service(store.clone(), transport, at(10))
            .send(req)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NoAvailableChannel));
        assert!(store.logs().is_empty());
        assert_eq!(store.key(1).daily_used, 0);
    }

    #[tokio::test]
    async fn test_empty_message_rejected_before_key_lookup() {
        let store = Arc::new(MemoryNotifyStore::default());
        let transport = Arc::new(ScriptedTransport::new(vec![]));

        let err = service(store, transport, at(10))
            .send(request("unknown", "", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let store = seeded_store();
        let transport = Arc::new(ScriptedTransport::new(vec![]));

        let err = service(store, transport, at(10))
            .send(request("nope", "", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidApiKey));
    }

    #[tokio::test]
    async fn test_all_channels_failing_still_commits() {
        let store = seeded_store();
        store.insert_channel(sample_channel(10, 7, 1));
        let transport = Arc::new(ScriptedTransport::new(vec![Err("timed out".to_string())]));

        let outcome = service(store.clone(), transport, at(10))
            .send(request("k1", "", "hi"))
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.fail_count, 1);
        let logs = store.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].response_data.as_deref(), Some("timed out"));
        assert_eq!(store.key(1).daily_used, 1);
    }

    #[tokio::test]
    async fn test_missing_platform_is_a_failed_attempt() {
        let store = seeded_store();
        store.insert_channel(sample_channel(10, 7, 99));
        let mut default = sample_channel(11, 7, 1);
        default.is_default = DefaultFlag::Yes;
        store.insert_channel(default);
        let transport = Arc::new(ScriptedTransport::new(vec![reply(200, "")]));

        let mut key = store.key(1);
        key.channel_ids = Some("10,11".to_string());
        store.insert_key(key);

        let outcome = service(store.clone(), transport, at(10))
            .send(request("k1", "", "hi"))
            .await
            .unwrap();

        assert_eq!(outcome.total, 2);
        assert!(!outcome.results[0].success);
        assert!(outcome.results[1].success);
        assert_eq!(store.logs().len(), 2);
    }

    #[tokio::test]
    async fn test_channel_test_writes_nothing() {
        let store = seeded_store();
        store.insert_channel(sample_channel(10, 7, 1));
        let transport = Arc::new(ScriptedTransport::new(vec![reply(
            200,
            r#"{"code":19001,"msg":"param invalid"}"#,
        )]));

        let outcome = service(store.clone(), transport.clone(), at(10))
            .test_channel(7, 10)
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.message, "param invalid");
        assert!(store.logs().is_empty());
        assert_eq!(store.channel(10).use_count, 0);
        assert_eq!(store.key(1).daily_used, 0);
        assert!(transport.requests()[0].body.contains("Test notification\\nChannel: "));
    }

    #[tokio::test]
    async fn test_channel_test_requires_ownership() {
        let store = seeded_store();
        store.insert_channel(sample_channel(10, 8, 1));
        let transport = Arc::new(ScriptedTransport::new(vec![]));

        let err = service(store, transport, at(10))
            .test_channel(7, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }
}
