//! Channel DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::clearable;
use crate::models::{
    DefaultFlag, NewNotifyChannel, NotifyChannel, RecordStatus, UpdateNotifyChannel,
};

/// Request to create a channel for the calling user
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "platform_id": 1,
    "channel_name": "Ops group",
    "webhook_key": "6f1c2a8e-0000-4b7e-9c1d-3f2a1b0c9d8e",
    "is_default": "1"
}))]
pub struct CreateChannelRequest {
    #[validate(range(min = 1, message = "Platform id must be positive"))]
    pub platform_id: i64,

    #[validate(length(min = 1, max = 50, message = "Channel name must be 1-50 characters"))]
    pub channel_name: String,

    /// Secret substituted into the platform's webhook template
    #[validate(length(min = 1, max = 500, message = "Webhook key must be 1-500 characters"))]
    pub webhook_key: String,

    /// Full URL overriding the platform template
    #[validate(url(message = "Webhook URL must be a valid URL"))]
    pub webhook_url: Option<String>,

    /// `"1"` to include the channel in default fan-out
    pub is_default: Option<DefaultFlag>,

    pub status: Option<RecordStatus>,

    #[validate(length(max = 500))]
    pub remark: Option<String>,
}

impl CreateChannelRequest {
    pub fn into_new_channel(self, user_id: i64) -> NewNotifyChannel {
        NewNotifyChannel {
            user_id,
            platform_id: self.platform_id,
            channel_name: self.channel_name,
            webhook_key: self.webhook_key,
            webhook_url: self.webhook_url.filter(|url| !url.is_empty()),
            is_default: self.is_default.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            use_count: 0,
            create_by: None,
            create_time: None,
            remark: self.remark,
        }
    }
}

/// Request to update a channel. An empty `webhook_url` or `remark` clears it.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateChannelRequest {
    #[validate(range(min = 1, message = "Platform id must be positive"))]
    pub platform_id: Option<i64>,

    #[validate(length(min = 1, max = 50, message = "Channel name must be 1-50 characters"))]
    pub channel_name: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Webhook key must be 1-500 characters"))]
    pub webhook_key: Option<String>,

    pub webhook_url: Option<String>,

    pub is_default: Option<DefaultFlag>,

    pub status: Option<RecordStatus>,

    #[validate(length(max = 500))]
    pub remark: Option<String>,
}

impl UpdateChannelRequest {
    pub fn into_update_channel(self) -> UpdateNotifyChannel {
        UpdateNotifyChannel {
            platform_id: self.platform_id,
            channel_name: self.channel_name,
            webhook_key: self.webhook_key,
            webhook_url: clearable(self.webhook_url),
            is_default: self.is_default,
            status: self.status,
            update_by: None,
            update_time: None,
            remark: clearable(self.remark),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChannelResponse {
    pub channel_id: i64,
    pub platform_id: i64,
    pub channel_name: String,
    pub webhook_key: String,
    pub webhook_url: Option<String>,
    pub is_default: DefaultFlag,
    pub status: RecordStatus,
    pub last_used_time: Option<NaiveDateTime>,
    pub use_count: i32,
    pub create_time: Option<NaiveDateTime>,
    pub update_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

impl From<NotifyChannel> for ChannelResponse {
    fn from(channel: NotifyChannel) -> Self {
        Self {
            channel_id: channel.channel_id,
            platform_id: channel.platform_id,
            channel_name: channel.channel_name,
            webhook_key: channel.webhook_key,
            webhook_url: channel.webhook_url,
            is_default: channel.is_default,
            status: channel.status,
            last_used_time: channel.last_used_time,
            use_count: channel.use_count,
            create_time: channel.create_time,
            update_time: channel.update_time,
            remark: channel.remark,
        }
    }
}
