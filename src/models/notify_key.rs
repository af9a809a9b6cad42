use crate::models::RecordStatus;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::Serialize;

/// NotifyKey query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::notify_key)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotifyKey {
    pub key_id: i64,
    pub user_id: i64,
    pub key_name: String,
    pub api_key: String,
    pub channel_ids: Option<String>,
    pub daily_limit: i32,
    pub daily_used: i32,
    pub total_count: i64,
    pub last_used_time: Option<NaiveDateTime>,
    pub last_reset_date: Option<NaiveDate>,
    pub status: RecordStatus,
    pub expire_time: Option<NaiveDateTime>,
    pub create_by: Option<String>,
    pub create_time: Option<NaiveDateTime>,
    pub update_by: Option<String>,
    pub update_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

impl NotifyKey {
    /// A key with an expiry strictly earlier than `now` is no longer usable.
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expire_time.is_some_and(|expire| expire < now)
    }

    /// Channel ids bound to this key, in stored order.
    ///
    /// Blank and non-numeric entries are skipped.
    pub fn bound_channel_ids(&self) -> Vec<i64> {
        self.channel_ids
            .as_deref()
            .map(parse_channel_ids)
            .unwrap_or_default()
    }
}

pub fn parse_channel_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
        .collect()
}

/// NewNotifyKey insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::notify_key)]
pub struct NewNotifyKey {
    pub user_id: i64,
    pub key_name: String,
    pub api_key: String,
    pub channel_ids: Option<String>,
    pub daily_limit: i32,
    pub daily_used: i32,
    pub total_count: i64,
    pub status: RecordStatus,
    pub expire_time: Option<NaiveDateTime>,
    pub create_by: Option<String>,
    pub create_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

/// UpdateNotifyKey model for UPDATE operations
///
/// Nullable columns use `Option<Option<_>>` so a request can clear them.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::notify_key)]
pub struct UpdateNotifyKey {
    pub key_name: Option<String>,
    pub api_key: Option<String>,
    pub channel_ids: Option<Option<String>>,
    pub daily_limit: Option<i32>,
    pub status: Option<RecordStatus>,
    pub expire_time: Option<Option<NaiveDateTime>>,
    pub update_by: Option<String>,
    pub update_time: Option<NaiveDateTime>,
    pub remark: Option<Option<String>>,
}

/// Filters accepted by the key listing
#[derive(Debug, Clone, Default)]
pub struct NotifyKeyFilter {
    pub user_id: i64,
    /// Substring of `key_name`
    pub key_name: Option<String>,
    pub status: Option<RecordStatus>,
}
