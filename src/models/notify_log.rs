use crate::models::SendStatus;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

/// One row per dispatch attempt; never updated after insert
#[derive(Debug, Queryable, Selectable, Serialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::notify_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotifyLog {
    pub log_id: i64,
    pub user_id: i64,
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
    pub cost_time: i64,
    pub create_time: NaiveDateTime,
}

#[derive(Debug, Insertable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::notify_log)]
pub struct NewNotifyLog {
    pub user_id: i64,
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
    pub cost_time: i64,
    pub create_time: NaiveDateTime,
}

/// Filters accepted by the log listing
#[derive(Debug, Clone, Default)]
pub struct NotifyLogFilter {
    pub user_id: i64,
    pub key_id: Option<i64>,
    pub channel_id: Option<i64>,
    pub platform_id: Option<i64>,
    /// Substring of `title`
    pub title: Option<String>,
    pub msg_type: Option<String>,
    pub status: Option<SendStatus>,
}
