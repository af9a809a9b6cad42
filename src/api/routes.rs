//! Router configuration for the API.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::{ApiDoc, with_user_header};
use crate::api::handlers::{channels, health, keys, logs, platforms, send};
use crate::api::middleware::{
    auth_middleware, global_error_handler, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Creates the main application router with all routes and middleware.
///
/// # Routes
/// - `/notify/send/{api_key}` - Public send endpoint (API key auth)
/// - `/api/notify/{platforms,channels,keys,logs}` - Management (user header auth)
/// - `/api/health` - Health check
/// - `/swagger-ui` - API documentation
///
/// # Middleware Order
/// Last added runs first: CORS, compression, request id, logging, then the
/// global error handler closest to the handlers.
pub fn create_router(state: AppState) -> Router {
    let (management_router, management_spec) = OpenApiRouter::new()
        .nest("/api/notify/platforms", platforms::platform_routes())
        .nest("/api/notify/channels", channels::channel_routes())
        .nest("/api/notify/keys", keys::key_routes())
        .nest("/api/notify/logs", logs::log_routes())
        .split_for_parts();

    let (public_router, public_spec) = OpenApiRouter::new()
        .nest("/notify/send", send::send_routes())
        .nest("/api", health::health_routes())
        .split_for_parts();

    let mut merged_spec = ApiDoc::openapi();
    merged_spec.merge(management_spec);
    merged_spec.merge(public_spec);
    let merged_spec = with_user_header(merged_spec, &state.notify.user_header);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    management_router
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .merge(public_router)
        .with_state(state)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, merged_spec))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(cors)
}
