use crate::models::{DefaultFlag, RecordStatus};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

/// A user's configured destination on one platform
#[derive(Debug, Queryable, Selectable, Serialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::notify_channel)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotifyChannel {
    pub channel_id: i64,
    pub user_id: i64,
    pub platform_id: i64,
    pub channel_name: String,
    pub webhook_key: String,
    pub webhook_url: Option<String>,
    pub is_default: DefaultFlag,
    pub status: RecordStatus,
    pub last_used_time: Option<NaiveDateTime>,
    pub use_count: i32,
    pub create_by: Option<String>,
    pub create_time: Option<NaiveDateTime>,
    pub update_by: Option<String>,
    pub update_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

impl NotifyChannel {
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    /// Full webhook URL overriding the platform template, if one is set.
    pub fn override_url(&self) -> Option<&str> {
        self.webhook_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::notify_channel)]
pub struct NewNotifyChannel {
    pub user_id: i64,
    pub platform_id: i64,
    pub channel_name: String,
    pub webhook_key: String,
    pub webhook_url: Option<String>,
    pub is_default: DefaultFlag,
    pub status: RecordStatus,
    pub use_count: i32,
    pub create_by: Option<String>,
    pub create_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::notify_channel)]
pub struct UpdateNotifyChannel {
    pub platform_id: Option<i64>,
    pub channel_name: Option<String>,
    pub webhook_key: Option<String>,
    pub webhook_url: Option<Option<String>>,
    pub is_default: Option<DefaultFlag>,
    pub status: Option<RecordStatus>,
    pub update_by: Option<String>,
    pub update_time: Option<NaiveDateTime>,
    pub remark: Option<Option<String>>,
}
