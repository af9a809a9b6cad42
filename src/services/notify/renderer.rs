//! Webhook URL and request body rendering.
//!
//! Bodies are produced by plain placeholder substitution into the platform's
//! template, so title and content are JSON-string escaped first.

use std::fmt::Write;

use crate::models::{NotifyChannel, NotifyPlatform};

pub const DEFAULT_BODY_TEMPLATE: &str = r#"{"msg_type":"text","content":{"text":"{content}"}}"#;

const KEY_PLACEHOLDER: &str = "{key}";
const CONTENT_PLACEHOLDER: &str = "{content}";
const TITLE_PLACEHOLDER: &str = "{title}";

/// A fully rendered outbound request, before transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRequest {
    pub url: String,
    pub method: String,
    pub content_type: String,
    pub body: String,
}

/// Renders the request for one channel.
pub fn render_request(
    platform: &NotifyPlatform,
    channel: &NotifyChannel,
    title: &str,
    content: &str,
) -> RenderedRequest {
    RenderedRequest {
        url: webhook_url(platform, channel),
        method: platform.method().to_string(),
        content_type: platform.content_type().to_string(),
        body: render_body(platform.body_template.as_deref(), title, content),
    }
}

/// The channel's override URL when set, else the platform template with
/// `{key}` replaced by the channel's webhook key.
pub fn webhook_url(platform: &NotifyPlatform, channel: &NotifyChannel) -> String {
    match channel.override_url() {
        Some(url) => url.to_string(),
        None => platform
            .webhook_template
            .replace(KEY_PLACEHOLDER, &channel.webhook_key),
    }
}

/// Fills `{content}` and `{title}` in `template`.
///
/// `{content}` receives `"{title}\n{content}"` when the title is non-empty.
/// Substitution is single pass: placeholder text inside the inserted values is
/// left alone. A missing or blank template falls back to [`DEFAULT_BODY_TEMPLATE`].
pub fn render_body(template: Option<&str>, title: &str, content: &str) -> String {
    let template = template
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_BODY_TEMPLATE);

    let message = if title.is_empty() {
        escape_json(content)
    } else {
        escape_json(&format!("{}\n{}", title, content))
    };
    let title = escape_json(title);

    let mut out = String::with_capacity(template.len() + message.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if tail.starts_with(CONTENT_PLACEHOLDER) {
            out.push_str(&message);
            rest = &tail[CONTENT_PLACEHOLDER.len()..];
        } else if tail.starts_with(TITLE_PLACEHOLDER) {
            out.push_str(&title);
            rest = &tail[TITLE_PLACEHOLDER.len()..];
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Escapes `value` for embedding inside a JSON string literal.
pub fn escape_json(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
