//! Send log row construction.

use chrono::NaiveDateTime;

use crate::models::{NewNotifyLog, NotifyChannel, NotifyKey, SendStatus};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_CONTENT_CHARS: usize = 5000;
pub const MAX_PAYLOAD_CHARS: usize = 5000;
pub const MAX_ERROR_CHARS: usize = 500;
pub const MAX_IP_CHARS: usize = 50;
pub const MAX_MSG_TYPE_CHARS: usize = 20;

/// Message fields shared by every attempt of one send call.
#[derive(Debug, Clone, Copy)]
pub struct LogContext<'a> {
    pub key: &'a NotifyKey,
    pub title: &'a str,
    pub content: &'a str,
    pub msg_type: &'a str,
    pub ip_address: Option<&'a str>,
}

/// What happened on one channel.
#[derive(Debug, Clone)]
pub struct AttemptRecord<'a> {
    pub channel: &'a NotifyChannel,
    pub request_body: &'a str,
    pub response_body: &'a str,
    pub success: bool,
    pub error: Option<&'a str>,
    pub sent_at: NaiveDateTime,
    pub cost_ms: i64,
}

/// Builds the log row for one attempt, capping text columns by characters.
pub fn build_log(ctx: &LogContext<'_>, attempt: &AttemptRecord<'_>) -> NewNotifyLog {
    NewNotifyLog {
        user_id: ctx.key.user_id,
        key_id: ctx.key.key_id,
        channel_id: attempt.channel.channel_id,
        platform_id: attempt.channel.platform_id,
        title: Some(truncate_chars(ctx.title, MAX_TITLE_CHARS)),
        content: Some(truncate_chars(ctx.content, MAX_CONTENT_CHARS)),
        msg_type: Some(truncate_chars(ctx.msg_type, MAX_MSG_TYPE_CHARS)),
        request_data: Some(truncate_chars(attempt.request_body, MAX_PAYLOAD_CHARS)),
        response_data: Some(truncate_chars(attempt.response_body, MAX_PAYLOAD_CHARS)),
        status: SendStatus::from_success(attempt.success),
        error_msg: attempt
            .error
            .map(|error| truncate_chars(error, MAX_ERROR_CHARS)),
        ip_address: ctx.ip_address.map(|ip| truncate_chars(ip, MAX_IP_CHARS)),
        send_time: attempt.sent_at,
        cost_time: attempt.cost_ms,
        create_time: attempt.sent_at,
    }
}

/// First `max` characters of `value`, never splitting a code point.
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}
