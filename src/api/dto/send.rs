//! DTOs for the public send endpoint.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};
use crate::services::notify::{DEFAULT_MSG_TYPE, SendOutcome, SendRequest};

/// A channel id as it arrives on the wire: JSON sends numbers, query strings
/// and forms send text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdParam {
    Num(i64),
    Text(String),
}

impl IdParam {
    fn parse(&self) -> AppResult<Option<i64>> {
        match self {
            IdParam::Num(id) => Ok(Some(*id)),
            IdParam::Text(raw) if raw.trim().is_empty() => Ok(None),
            IdParam::Text(raw) => {
                raw.trim()
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| AppError::Validation {
                        field: "channel_id".to_string(),
                        reason: format!("'{}' is not a valid channel id", raw),
                    })
            }
        }
    }
}

/// Send parameters, accepted from the query string, a form body or a JSON body.
///
/// `content`, `text` and `desp` are aliases; the first non-empty one is used.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
#[schema(example = json!({
    "title": "Disk alert",
    "content": "disk /var is 95% full",
    "msg_type": "text",
    "channel_id": 12
}))]
pub struct SendParams {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Alias of `content`
    pub text: Option<String>,
    /// Alias of `content`
    pub desp: Option<String>,
    /// Defaults to `text`
    pub msg_type: Option<String>,
    /// Restrict the send to one of the key's channels
    #[param(value_type = Option<i64>)]
    #[schema(value_type = Option<i64>)]
    pub channel_id: Option<IdParam>,
}

fn first_filled(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary.filter(|v| !v.is_empty()).or(fallback)
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

impl SendParams {
    fn has_content(&self) -> bool {
        is_filled(&self.content) || is_filled(&self.text) || is_filled(&self.desp)
    }

    /// Fills every field missing from `self` with the one from `fallback`.
    ///
    /// The content aliases move as one group: any filled alias on `self`
    /// shadows all of `fallback`'s.
    pub fn or(self, fallback: SendParams) -> SendParams {
        let (content, text, desp) = if self.has_content() {
            (self.content, self.text, self.desp)
        } else {
            (fallback.content, fallback.text, fallback.desp)
        };

        SendParams {
            title: first_filled(self.title, fallback.title),
            content,
            text,
            desp,
            msg_type: first_filled(self.msg_type, fallback.msg_type),
            channel_id: match self.channel_id {
                Some(IdParam::Text(raw)) if raw.trim().is_empty() => fallback.channel_id,
                Some(id) => Some(id),
                None => fallback.channel_id,
            },
        }
    }

    pub fn into_send_request(
        self,
        api_key: String,
        ip_address: Option<String>,
    ) -> AppResult<SendRequest> {
        let channel_id = match &self.channel_id {
            Some(id) => id.parse()?,
            None => None,
        };
        let content = [self.content, self.text, self.desp]
            .into_iter()
            .flatten()
            .find(|c| !c.is_empty())
            .unwrap_or_default();

        Ok(SendRequest {
            api_key,
            title: self.title.unwrap_or_default(),
            content,
            msg_type: self
                .msg_type
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MSG_TYPE.to_string()),
            channel_id,
            ip_address,
        })
    }
}

/// Envelope returned by the send endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "code": 200,
    "msg": "Sent to 2/3 channel(s)",
    "data": {
        "success": true,
        "total": 3,
        "success_count": 2,
        "fail_count": 1,
        "results": []
    }
}))]
pub struct SendResponse {
    /// 200 when at least one channel succeeded, 500 otherwise
    pub code: u16,
    pub msg: String,
    pub data: SendOutcome,
}

impl From<SendOutcome> for SendResponse {
    fn from(outcome: SendOutcome) -> Self {
        let (code, msg) = if outcome.success {
            (
                200,
                format!(
                    "Sent to {}/{} channel(s)",
                    outcome.success_count, outcome.total
                ),
            )
        } else {
            (500, "Send failed on every channel".to_string())
        };
        Self {
            code,
            msg,
            data: outcome,
        }
    }
}
