use crate::models::RecordStatus;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

pub const DEFAULT_REQUEST_METHOD: &str = "POST";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Platform query model: a reusable webhook provider definition
#[derive(Debug, Queryable, Selectable, Serialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::notify_platform)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotifyPlatform {
    pub platform_id: i64,
    pub platform_name: String,
    pub platform_code: String,
    pub platform_icon: Option<String>,
    pub webhook_template: String,
    pub request_method: Option<String>,
    pub content_type: Option<String>,
    pub body_template: Option<String>,
    pub status: RecordStatus,
    pub order_num: i32,
    pub create_by: Option<String>,
    pub create_time: Option<NaiveDateTime>,
    pub update_by: Option<String>,
    pub update_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

impl NotifyPlatform {
    pub fn method(&self) -> &str {
        non_blank(self.request_method.as_deref()).unwrap_or(DEFAULT_REQUEST_METHOD)
    }

    pub fn content_type(&self) -> &str {
        non_blank(self.content_type.as_deref()).unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::notify_platform)]
pub struct NewNotifyPlatform {
    pub platform_name: String,
    pub platform_code: String,
    pub platform_icon: Option<String>,
    pub webhook_template: String,
    pub request_method: Option<String>,
    pub content_type: Option<String>,
    pub body_template: Option<String>,
    pub status: RecordStatus,
    pub order_num: i32,
    pub create_by: Option<String>,
    pub create_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::notify_platform)]
pub struct UpdateNotifyPlatform {
    pub platform_name: Option<String>,
    pub platform_code: Option<String>,
    pub platform_icon: Option<Option<String>>,
    pub webhook_template: Option<String>,
    pub request_method: Option<Option<String>>,
    pub content_type: Option<Option<String>>,
    pub body_template: Option<Option<String>>,
    pub status: Option<RecordStatus>,
    pub order_num: Option<i32>,
    pub update_by: Option<String>,
    pub update_time: Option<NaiveDateTime>,
    pub remark: Option<Option<String>>,
}

/// Filters accepted by the platform listing; text fields match substrings
#[derive(Debug, Clone, Default)]
pub struct NotifyPlatformFilter {
    pub platform_name: Option<String>,
    pub platform_code: Option<String>,
    pub status: Option<RecordStatus>,
}
