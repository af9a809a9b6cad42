//! API key DTOs.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::clearable;
use crate::models::{NotifyKey, NotifyKeyFilter, RecordStatus, UpdateNotifyKey};
use crate::services::{KeyDraft, join_channel_ids};

/// Request to generate a key. The secret itself is always server-generated.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "key_name": "ci-pipeline",
    "channel_ids": [1, 4],
    "daily_limit": 500
}))]
pub struct GenerateKeyRequest {
    #[validate(length(min = 1, max = 50, message = "Key name must be 1-50 characters"))]
    pub key_name: String,

    /// Bound channels; empty means the user's default channels
    #[serde(default)]
    pub channel_ids: Vec<i64>,

    /// Sends allowed per day; 0 blocks the key. Defaults to the server setting.
    #[validate(range(min = 0, message = "Daily limit cannot be negative"))]
    pub daily_limit: Option<i32>,

    pub expire_time: Option<NaiveDateTime>,

    #[validate(length(max = 500))]
    pub remark: Option<String>,
}

impl GenerateKeyRequest {
    pub fn into_draft(self) -> KeyDraft {
        KeyDraft {
            key_name: self.key_name,
            channel_ids: self.channel_ids,
            daily_limit: self.daily_limit,
            expire_time: self.expire_time,
            remark: self.remark,
        }
    }
}

/// Filters for the key listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct KeyQuery {
    /// Substring of the key name
    #[validate(length(max = 50))]
    pub key_name: Option<String>,
    /// `"0"` active, `"1"` disabled
    #[param(value_type = Option<String>)]
    pub status: Option<RecordStatus>,
}

impl KeyQuery {
    pub fn into_filter(self, user_id: i64) -> NotifyKeyFilter {
        NotifyKeyFilter {
            user_id,
            key_name: self.key_name.filter(|n| !n.is_empty()),
            status: self.status,
        }
    }
}

/// Request to update a key's settings.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateKeyRequest {
    #[validate(length(min = 1, max = 50, message = "Key name must be 1-50 characters"))]
    pub key_name: Option<String>,

    /// Replaces the bound channels; an empty list unbinds all
    pub channel_ids: Option<Vec<i64>>,

    #[validate(range(min = 0, message = "Daily limit cannot be negative"))]
    pub daily_limit: Option<i32>,

    pub status: Option<RecordStatus>,

    pub expire_time: Option<NaiveDateTime>,

    /// Removes the expiry when set
    #[serde(default)]
    pub clear_expire_time: bool,

    #[validate(length(max = 500))]
    pub remark: Option<String>,
}

impl UpdateKeyRequest {
    pub fn into_update_key(self) -> UpdateNotifyKey {
        let expire_time = if self.clear_expire_time {
            Some(None)
        } else {
            self.expire_time.map(Some)
        };

        UpdateNotifyKey {
            key_name: self.key_name,
            api_key: None,
            channel_ids: self.channel_ids.as_deref().map(join_channel_ids),
            daily_limit: self.daily_limit,
            status: self.status,
            expire_time,
            update_by: None,
            update_time: None,
            remark: clearable(self.remark),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KeyResponse {
    pub key_id: i64,
    pub key_name: String,
    /// Masked in listings
    pub api_key: String,
    pub channel_ids: Vec<i64>,
    pub daily_limit: i32,
    pub daily_used: i32,
    pub total_count: i64,
    pub last_used_time: Option<NaiveDateTime>,
    pub last_reset_date: Option<NaiveDate>,
    pub status: RecordStatus,
    pub expire_time: Option<NaiveDateTime>,
    pub create_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

impl KeyResponse {
    /// Same as `from`, with the secret reduced to its first and last four characters.
    pub fn masked(key: NotifyKey) -> Self {
        let mut response = Self::from(key);
        response.api_key = mask_secret(&response.api_key);
        response
    }
}

fn mask_secret(secret: &str) -> String {
    if secret.len() <= 8 || !secret.is_ascii() {
        return "*".repeat(secret.chars().count());
    }
    format!("{}****{}", &secret[..4], &secret[secret.len() - 4..])
}

impl From<NotifyKey> for KeyResponse {
    fn from(key: NotifyKey) -> Self {
        let channel_ids = key.bound_channel_ids();
        Self {
            key_id: key.key_id,
            key_name: key.key_name,
            api_key: key.api_key,
            channel_ids,
            daily_limit: key.daily_limit,
            daily_used: key.daily_used,
            total_count: key.total_count,
            last_used_time: key.last_used_time,
            last_reset_date: key.last_reset_date,
            status: key.status,
            expire_time: key.expire_time,
            create_time: key.create_time,
            remark: key.remark,
        }
    }
}
