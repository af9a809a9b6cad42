//! Channel management handlers.
//!
//! Every route is scoped to the caller; touching another user's channel is
//! `403 Forbidden`.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CHANNEL_TAG;
use crate::api::dto::{
    ChannelResponse, CreateChannelRequest, ErrorResponse, PagedResponse, PaginationParams,
    UpdateChannelRequest, parse_id_list,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::services::notify::ChannelTestOutcome;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates channel routes.
///
/// Routes:
/// - GET /            - List own channels (paginated)
/// - POST /           - Create channel
/// - GET /{id}        - Get channel
/// - PUT /{id}        - Update channel
/// - DELETE /{ids}    - Delete comma-separated channels
/// - POST /{id}/test  - Send a test message through the channel
pub fn channel_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_channels, create_channel))
        .routes(routes!(get_channel, update_channel, delete_channels))
        .routes(routes!(test_channel))
}

/// GET /api/notify/channels - List own channels
#[utoipa::path(
    get,
    path = "/",
    tag = CHANNEL_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of channels", body = PagedResponse<ChannelResponse>)
    ),
    security(("userHeader" = []))
)]
async fn list_channels(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<ChannelResponse>>> {
    let (channels, total) = state
        .services
        .channels
        .list_channels(auth_user.user_id, params.offset(), params.limit())
        .await?;

    let responses = channels.into_iter().map(ChannelResponse::from).collect();
    Ok(Json(PagedResponse::new(responses, &params, total)))
}

/// GET /api/notify/channels/{id} - Get channel
#[utoipa::path(
    get,
    path = "/{id}",
    tag = CHANNEL_TAG,
    params(("id" = i64, Path, description = "Channel ID")),
    responses(
        (status = 200, description = "Channel found", body = ChannelResponse),
        (status = 403, description = "Channel belongs to another user", body = ErrorResponse),
        (status = 404, description = "Channel not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn get_channel(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<ChannelResponse>> {
    let channel = state
        .services
        .channels
        .get_channel(auth_user.user_id, id)
        .await?;
    Ok(Json(ChannelResponse::from(channel)))
}

/// POST /api/notify/channels - Create channel
#[utoipa::path(
    post,
    path = "/",
    tag = CHANNEL_TAG,
    request_body = CreateChannelRequest,
    responses(
        (status = 201, description = "Channel created", body = ChannelResponse),
        (status = 400, description = "Invalid request or unknown platform", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn create_channel(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateChannelRequest>,
) -> AppResult<(StatusCode, Json<ChannelResponse>)> {
    let channel = state
        .services
        .channels
        .create_channel(payload.into_new_channel(auth_user.user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(ChannelResponse::from(channel))))
}

/// PUT /api/notify/channels/{id} - Update channel
#[utoipa::path(
    put,
    path = "/{id}",
    tag = CHANNEL_TAG,
    params(("id" = i64, Path, description = "Channel ID")),
    request_body = UpdateChannelRequest,
    responses(
        (status = 200, description = "Channel updated", body = ChannelResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Channel belongs to another user", body = ErrorResponse),
        (status = 404, description = "Channel not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn update_channel(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateChannelRequest>,
) -> AppResult<Json<ChannelResponse>> {
    let channel = state
        .services
        .channels
        .update_channel(auth_user.user_id, id, payload.into_update_channel())
        .await?;
    Ok(Json(ChannelResponse::from(channel)))
}

/// DELETE /api/notify/channels/{ids} - Delete channels
///
/// Nothing is deleted unless every listed channel exists and is owned by the caller.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CHANNEL_TAG,
    params(("id" = String, Path, description = "Comma-separated channel IDs, e.g. `3,5`")),
    responses(
        (status = 204, description = "Channels deleted"),
        (status = 400, description = "Malformed id list", body = ErrorResponse),
        (status = 403, description = "A channel belongs to another user", body = ErrorResponse),
        (status = 404, description = "A channel was not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn delete_channels(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(raw_ids): Path<String>,
) -> AppResult<StatusCode> {
    let ids = parse_id_list(&raw_ids)?;
    state
        .services
        .channels
        .delete_channels(auth_user.user_id, &ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/notify/channels/{id}/test - Test channel connectivity
///
/// Sends a fixed test message through the channel's platform. Nothing is
/// logged and no quota is used.
#[utoipa::path(
    post,
    path = "/{id}/test",
    tag = CHANNEL_TAG,
    params(("id" = i64, Path, description = "Channel ID")),
    responses(
        (status = 200, description = "Test result", body = ChannelTestOutcome),
        (status = 403, description = "Channel belongs to another user", body = ErrorResponse),
        (status = 404, description = "Channel not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn test_channel(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<ChannelTestOutcome>> {
    let outcome = state
        .services
        .sender
        .test_channel(auth_user.user_id, id)
        .await?;
    Ok(Json(outcome))
}
