//! Platform DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::api::dto::clearable;
use crate::models::{
    NewNotifyPlatform, NotifyPlatform, NotifyPlatformFilter, RecordStatus, UpdateNotifyPlatform,
};

const METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH"];

fn validate_method(method: &str) -> Result<(), ValidationError> {
    if method.is_empty() || METHODS.contains(&method.to_uppercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("request_method")
            .with_message("Request method must be one of GET, POST, PUT, PATCH".into()))
    }
}

/// Filters for the platform listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PlatformQuery {
    /// Substring of the platform name
    #[validate(length(max = 50))]
    pub platform_name: Option<String>,
    /// Substring of the platform code
    #[validate(length(max = 50))]
    pub platform_code: Option<String>,
    #[param(value_type = Option<String>)]
    pub status: Option<RecordStatus>,
}

impl PlatformQuery {
    pub fn into_filter(self) -> NotifyPlatformFilter {
        NotifyPlatformFilter {
            platform_name: self.platform_name.filter(|n| !n.is_empty()),
            platform_code: self.platform_code.filter(|c| !c.is_empty()),
            status: self.status,
        }
    }
}

/// Request to register a webhook platform
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "platform_name": "Feishu",
    "platform_code": "feishu",
    "webhook_template": "https://open.feishu.cn/open-apis/bot/v2/hook/{key}",
    "request_method": "POST",
    "content_type": "application/json",
    "body_template": "{\"msg_type\":\"text\",\"content\":{\"text\":\"{content}\"}}",
    "order_num": 1
}))]
pub struct CreatePlatformRequest {
    #[validate(length(min = 1, max = 50, message = "Platform name must be 1-50 characters"))]
    pub platform_name: String,

    #[validate(length(min = 1, max = 50, message = "Platform code must be 1-50 characters"))]
    pub platform_code: String,

    #[validate(length(max = 255))]
    pub platform_icon: Option<String>,

    /// Webhook URL; `{key}` is replaced with the channel's webhook key
    #[validate(length(min = 1, max = 500, message = "Webhook template must be 1-500 characters"))]
    pub webhook_template: String,

    /// Defaults to `POST`
    #[validate(custom(function = "validate_method"))]
    pub request_method: Option<String>,

    /// Defaults to `application/json`
    #[validate(length(max = 100))]
    pub content_type: Option<String>,

    /// Body with `{title}`, `{content}`, `{msg_type}` placeholders
    pub body_template: Option<String>,

    pub status: Option<RecordStatus>,

    #[serde(default)]
    pub order_num: i32,

    #[validate(length(max = 500))]
    pub remark: Option<String>,
}

impl CreatePlatformRequest {
    pub fn into_new_platform(self) -> NewNotifyPlatform {
        NewNotifyPlatform {
            platform_name: self.platform_name,
            platform_code: self.platform_code,
            platform_icon: self.platform_icon,
            webhook_template: self.webhook_template,
            request_method: self.request_method.map(|m| m.to_uppercase()),
            content_type: self.content_type,
            body_template: self.body_template,
            status: self.status.unwrap_or_default(),
            order_num: self.order_num,
            create_by: None,
            create_time: None,
            remark: self.remark,
        }
    }
}

/// Request to update a platform. An empty string clears a nullable field.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdatePlatformRequest {
    #[validate(length(min = 1, max = 50, message = "Platform name must be 1-50 characters"))]
    pub platform_name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Platform code must be 1-50 characters"))]
    pub platform_code: Option<String>,

    #[validate(length(max = 255))]
    pub platform_icon: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Webhook template must be 1-500 characters"))]
    pub webhook_template: Option<String>,

    #[validate(custom(function = "validate_method"))]
    pub request_method: Option<String>,

    #[validate(length(max = 100))]
    pub content_type: Option<String>,

    pub body_template: Option<String>,

    pub status: Option<RecordStatus>,

    pub order_num: Option<i32>,

    #[validate(length(max = 500))]
    pub remark: Option<String>,
}

impl UpdatePlatformRequest {
    pub fn into_update_platform(self) -> UpdateNotifyPlatform {
        UpdateNotifyPlatform {
            platform_name: self.platform_name,
            platform_code: self.platform_code,
            platform_icon: clearable(self.platform_icon),
            webhook_template: self.webhook_template,
            request_method: clearable(self.request_method.map(|m| m.to_uppercase())),
            content_type: clearable(self.content_type),
            body_template: clearable(self.body_template),
            status: self.status,
            order_num: self.order_num,
            update_by: None,
            update_time: None,
            remark: clearable(self.remark),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformResponse {
    pub platform_id: i64,
    pub platform_name: String,
    pub platform_code: String,
    pub platform_icon: Option<String>,
    pub webhook_template: String,
    /// Effective method, defaults applied
    pub request_method: String,
    /// Effective content type, defaults applied
    pub content_type: String,
    pub body_template: Option<String>,
    pub status: RecordStatus,
    pub order_num: i32,
    pub create_time: Option<NaiveDateTime>,
    pub update_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

impl From<NotifyPlatform> for PlatformResponse {
    fn from(platform: NotifyPlatform) -> Self {
        let request_method = platform.method().to_string();
        let content_type = platform.content_type().to_string();
        Self {
            platform_id: platform.platform_id,
            platform_name: platform.platform_name,
            platform_code: platform.platform_code,
            platform_icon: platform.platform_icon,
            webhook_template: platform.webhook_template,
            request_method,
            content_type,
            body_template: platform.body_template,
            status: platform.status,
            order_num: platform.order_num,
            create_time: platform.create_time,
            update_time: platform.update_time,
            remark: platform.remark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreatePlatformRequest {
        serde_json::from_value(serde_json::json!({
            "platform_name": "DingTalk",
            "platform_code": "dingtalk",
            "webhook_template": "https://oapi.dingtalk.com/robot/send?access_token={key}",
            "request_method": "post"
        }))
        .unwrap()
    }

    #[test]
    fn test_create_request_defaults() {
        let request = create_request();
        assert!(request.validate().is_ok());

        let new_platform = request.into_new_platform();
        assert_eq!(new_platform.request_method.as_deref(), Some("POST"));
        assert_eq!(new_platform.status, RecordStatus::Active);
        assert_eq!(new_platform.order_num, 0);
    }

    #[test]
    fn test_platform_query_to_filter() {
        let query = PlatformQuery {
            platform_name: Some(String::new()),
            platform_code: Some("feishu".to_string()),
            status: Some(RecordStatus::Active),
        };
        let filter = query.into_filter();
        assert_eq!(filter.platform_name, None);
        assert_eq!(filter.platform_code.as_deref(), Some("feishu"));
        assert_eq!(filter.status, Some(RecordStatus::Active));
    }

    #[test]
    fn test_unknown_method_rejected() {
        let mut request = create_request();
        request.request_method = Some("TRACE".to_string());
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("request_method"));
    }

    #[test]
    fn test_update_empty_string_clears() {
        let request: UpdatePlatformRequest = serde_json::from_value(serde_json::json!({
            "body_template": "",
            "order_num": 3
        }))
        .unwrap();

        let update = request.into_update_platform();
        assert_eq!(update.body_template, Some(None));
        assert_eq!(update.content_type, None);
        assert_eq!(update.order_num, Some(3));
    }
}
