//! Notification dispatch pipeline.
//!
//! Key validation, daily quota, channel resolution, payload rendering,
//! webhook dispatch and audit logging, driven by [`NotifySendService`].

pub mod audit;
mod dispatcher;
mod keygen;
#[cfg(test)]
pub(crate) mod memory;
mod quota;
mod renderer;
mod resolver;
mod send_service;
mod store;
mod validator;

pub use dispatcher::{
    DispatchResult, HttpTransport, WebhookRequest, WebhookResponse, WebhookTransport,
    classify_response, dispatch,
};
pub use keygen::{API_KEY_BYTES, generate_api_key};
pub use quota::check_quota;
pub use renderer::{
    DEFAULT_BODY_TEMPLATE, RenderedRequest, escape_json, render_body, render_request, webhook_url,
};
pub use resolver::resolve_channels;
pub use send_service::{
    ChannelSendOutcome, ChannelTestOutcome, DEFAULT_MSG_TYPE, NotifySendService, SendOutcome,
    SendRequest,
};
pub use store::{KeyUsage, NotifyStore, SendCommit};
pub use validator::validate_api_key;
