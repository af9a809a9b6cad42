use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const SEND_TAG: &str = "Send";
pub const PLATFORM_TAG: &str = "Platforms";
pub const CHANNEL_TAG: &str = "Channels";
pub const KEY_TAG: &str = "Keys";
pub const LOG_TAG: &str = "Logs";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "notify-rs",
        description = "Webhook notification relay: API-key authenticated fan-out to chat platforms",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::RecordStatus,
            crate::models::SendStatus,
            crate::models::DefaultFlag,
        )
    ),
    tags(
        (name = SEND_TAG, description = "Public send endpoint, authenticated by API key"),
        (name = PLATFORM_TAG, description = "Webhook platform definitions"),
        (name = CHANNEL_TAG, description = "The caller's notification channels"),
        (name = KEY_TAG, description = "The caller's API keys"),
        (name = LOG_TAG, description = "Send logs"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

fn user_header_scheme(header: &str) -> SecurityScheme {
    SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
        header,
        "Numeric user id set by the upstream gateway",
    )))
}

/// Registers the gateway-provided user header under its default name.
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "userHeader",
            user_header_scheme(&crate::config::NotifyConfig::default().user_header),
        );
    }
}

/// Points the `userHeader` scheme at the header name configured at startup.
pub fn with_user_header(
    mut openapi: utoipa::openapi::OpenApi,
    header: &str,
) -> utoipa::openapi::OpenApi {
    let components = openapi.components.get_or_insert_with(Default::default);
    components.add_security_scheme("userHeader", user_header_scheme(header));
    openapi
}
