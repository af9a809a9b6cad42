//! Send log DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{NotifyLog, NotifyLogFilter, SendStatus};

/// Filters for the log listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct LogQuery {
    #[validate(range(min = 1))]
    pub key_id: Option<i64>,
    #[validate(range(min = 1))]
    pub channel_id: Option<i64>,
    #[validate(range(min = 1))]
    pub platform_id: Option<i64>,
    /// Substring of the title
    #[validate(length(max = 200))]
    pub title: Option<String>,
    /// Exact message type, e.g. `text`
    #[validate(length(max = 20))]
    pub msg_type: Option<String>,
    /// `"0"` success, `"1"` failed
    #[param(value_type = Option<String>)]
    pub status: Option<SendStatus>,
}

impl LogQuery {
    pub fn into_filter(self, user_id: i64) -> NotifyLogFilter {
        NotifyLogFilter {
            user_id,
            key_id: self.key_id,
            channel_id: self.channel_id,
            platform_id: self.platform_id,
            title: self.title.filter(|t| !t.is_empty()),
            msg_type: self.msg_type.filter(|m| !m.is_empty()),
            status: self.status,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogResponse {
    pub log_id: i64,
    pub key_id: i64,
    pub channel_id: i64,
    pub platform_id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub msg_type: Option<String>,
    pub request_data: Option<String>,
    pub response_data: Option<String>,
    pub status: SendStatus,
    pub error_msg: Option<String>,
    pub ip_address: Option<String>,
    pub send_time: NaiveDateTime,
    /// Milliseconds spent on the webhook call
    pub cost_time: i64,
}

impl From<NotifyLog> for LogResponse {
    fn from(log: NotifyLog) -> Self {
        Self {
            log_id: log.log_id,
            key_id: log.key_id,
            channel_id: log.channel_id,
            platform_id: log.platform_id,
            title: log.title,
            content: log.content,
            msg_type: log.msg_type,
            request_data: log.request_data,
            response_data: log.response_data,
            status: log.status,
            error_msg: log.error_msg,
            ip_address: log.ip_address,
            send_time: log.send_time,
            cost_time: log.cost_time,
        }
    }
}
