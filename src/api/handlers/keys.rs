//! API key management handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::KEY_TAG;
use crate::api::dto::{
    ErrorResponse, GenerateKeyRequest, KeyQuery, KeyResponse, PagedResponse, PaginationParams,
    UpdateKeyRequest, parse_id_list,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates key routes.
///
/// Routes:
/// - GET /             - List own keys (paginated, secrets masked)
/// - POST /            - Generate a key
/// - GET /{id}         - Get key
/// - PUT /{id}         - Update key settings
/// - DELETE /{ids}     - Delete comma-separated keys
/// - POST /{id}/reset  - Replace the key's secret
pub fn key_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_keys, generate_key))
        .routes(routes!(get_key, update_key, delete_keys))
        .routes(routes!(reset_key))
}

/// GET /api/notify/keys - List own keys
#[utoipa::path(
    get,
    path = "/",
    tag = KEY_TAG,
    params(PaginationParams, KeyQuery),
    responses(
        (status = 200, description = "Paginated keys with masked secrets", body = PagedResponse<KeyResponse>)
    ),
    security(("userHeader" = []))
)]
async fn list_keys(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(query): ValidatedQuery<KeyQuery>,
) -> AppResult<Json<PagedResponse<KeyResponse>>> {
    let filter = query.into_filter(auth_user.user_id);
    let (keys, total) = state
        .services
        .keys
        .list_keys(&filter, params.offset(), params.limit())
        .await?;

    let responses = keys.into_iter().map(KeyResponse::masked).collect();
    Ok(Json(PagedResponse::new(responses, &params, total)))
}

/// GET /api/notify/keys/{id} - Get key, including its secret
#[utoipa::path(
    get,
    path = "/{id}",
    tag = KEY_TAG,
    params(("id" = i64, Path, description = "Key ID")),
    responses(
        (status = 200, description = "Key found", body = KeyResponse),
        (status = 403, description = "Key belongs to another user", body = ErrorResponse),
        (status = 404, description = "Key not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn get_key(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<KeyResponse>> {
    let key = state.services.keys.get_key(auth_user.user_id, id).await?;
    Ok(Json(KeyResponse::from(key)))
}

/// POST /api/notify/keys - Generate a key
///
/// The secret is generated server-side and returned in full.
#[utoipa::path(
    post,
    path = "/",
    tag = KEY_TAG,
    request_body = GenerateKeyRequest,
    responses(
        (status = 201, description = "Key generated", body = KeyResponse),
        (status = 400, description = "Invalid request or foreign channel", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn generate_key(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<GenerateKeyRequest>,
) -> AppResult<(StatusCode, Json<KeyResponse>)> {
    let key = state
        .services
        .keys
        .generate_key(auth_user.user_id, payload.into_draft())
        .await?;
    Ok((StatusCode::CREATED, Json(KeyResponse::from(key))))
}

/// PUT /api/notify/keys/{id} - Update key settings
#[utoipa::path(
    put,
    path = "/{id}",
    tag = KEY_TAG,
    params(("id" = i64, Path, description = "Key ID")),
    request_body = UpdateKeyRequest,
    responses(
        (status = 200, description = "Key updated", body = KeyResponse),
        (status = 400, description = "Invalid request or foreign channel", body = ErrorResponse),
        (status = 403, description = "Key belongs to another user", body = ErrorResponse),
        (status = 404, description = "Key not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn update_key(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateKeyRequest>,
) -> AppResult<Json<KeyResponse>> {
    let key = state
        .services
        .keys
        .update_key(auth_user.user_id, id, payload.into_update_key())
        .await?;
    Ok(Json(KeyResponse::masked(key)))
}

/// DELETE /api/notify/keys/{ids} - Delete keys
///
/// Nothing is deleted unless every listed key exists and is owned by the caller.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = KEY_TAG,
    params(("id" = String, Path, description = "Comma-separated key IDs, e.g. `3,5`")),
    responses(
        (status = 204, description = "Keys deleted"),
        (status = 400, description = "Malformed id list", body = ErrorResponse),
        (status = 403, description = "A key belongs to another user", body = ErrorResponse),
        (status = 404, description = "A key was not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn delete_keys(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(raw_ids): Path<String>,
) -> AppResult<StatusCode> {
    let ids = parse_id_list(&raw_ids)?;
    state.services.keys.delete_keys(auth_user.user_id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/notify/keys/{id}/reset - Replace the key's secret
///
/// The previous secret stops working immediately.
#[utoipa::path(
    post,
    path = "/{id}/reset",
    tag = KEY_TAG,
    params(("id" = i64, Path, description = "Key ID")),
    responses(
        (status = 200, description = "Key with its new secret", body = KeyResponse),
        (status = 403, description = "Key belongs to another user", body = ErrorResponse),
        (status = 404, description = "Key not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn reset_key(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<KeyResponse>> {
    let key = state.services.keys.reset_key(auth_user.user_id, id).await?;
    Ok(Json(KeyResponse::from(key)))
}
