//! Platform management handlers.
//!
//! Any caller may read platforms; writes are limited to the users listed in
//! `notify.admin_user_ids`.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PLATFORM_TAG;
use crate::api::dto::{
    CreatePlatformRequest, ErrorResponse, PagedResponse, PaginationParams, PlatformQuery,
    PlatformResponse, UpdatePlatformRequest, parse_id_list,
};
use crate::api::middleware::AdminUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates platform routes.
///
/// Routes:
/// - GET /          - List platforms (paginated)
/// - POST /         - Create platform (admin)
/// - GET /{id}      - Get platform
/// - PUT /{id}      - Update platform (admin)
/// - DELETE /{ids}  - Delete comma-separated platforms (admin)
pub fn platform_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_platforms, create_platform))
        .routes(routes!(get_platform, update_platform, delete_platforms))
}

/// GET /api/notify/platforms - List platforms ordered by `order_num`
#[utoipa::path(
    get,
    path = "/",
    tag = PLATFORM_TAG,
    params(PaginationParams, PlatformQuery),
    responses(
        (status = 200, description = "Paginated platforms", body = PagedResponse<PlatformResponse>)
    ),
    security(("userHeader" = []))
)]
async fn list_platforms(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(query): ValidatedQuery<PlatformQuery>,
) -> AppResult<Json<PagedResponse<PlatformResponse>>> {
    let (platforms, total) = state
        .services
        .platforms
        .list_platforms(&query.into_filter(), params.offset(), params.limit())
        .await?;

    let responses = platforms.into_iter().map(PlatformResponse::from).collect();
    Ok(Json(PagedResponse::new(responses, &params, total)))
}

/// GET /api/notify/platforms/{id} - Get platform by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PLATFORM_TAG,
    params(("id" = i64, Path, description = "Platform ID")),
    responses(
        (status = 200, description = "Platform found", body = PlatformResponse),
        (status = 404, description = "Platform not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn get_platform(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PlatformResponse>> {
    let platform = state.services.platforms.get_platform(id).await?;
    Ok(Json(PlatformResponse::from(platform)))
}

/// POST /api/notify/platforms - Create platform
#[utoipa::path(
    post,
    path = "/",
    tag = PLATFORM_TAG,
    request_body = CreatePlatformRequest,
    responses(
        (status = 201, description = "Platform created", body = PlatformResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 409, description = "Platform code already exists", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn create_platform(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(payload): ValidatedJson<CreatePlatformRequest>,
) -> AppResult<(StatusCode, Json<PlatformResponse>)> {
    let platform = state
        .services
        .platforms
        .create_platform(payload.into_new_platform(), &admin.operator())
        .await?;
    Ok((StatusCode::CREATED, Json(PlatformResponse::from(platform))))
}

/// PUT /api/notify/platforms/{id} - Update platform
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PLATFORM_TAG,
    params(("id" = i64, Path, description = "Platform ID")),
    request_body = UpdatePlatformRequest,
    responses(
        (status = 200, description = "Platform updated", body = PlatformResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Platform not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn update_platform(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdatePlatformRequest>,
) -> AppResult<Json<PlatformResponse>> {
    let platform = state
        .services
        .platforms
        .update_platform(id, payload.into_update_platform(), &admin.operator())
        .await?;
    Ok(Json(PlatformResponse::from(platform)))
}

/// DELETE /api/notify/platforms/{ids} - Delete platforms
///
/// Nothing is deleted unless every listed platform exists.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PLATFORM_TAG,
    params(("id" = String, Path, description = "Comma-separated platform IDs, e.g. `3,5`")),
    responses(
        (status = 204, description = "Platforms deleted"),
        (status = 400, description = "Malformed id list", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "A platform was not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn delete_platforms(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(raw_ids): Path<String>,
) -> AppResult<StatusCode> {
    let ids = parse_id_list(&raw_ids)?;
    let deleted = state.services.platforms.delete_platforms(&ids).await?;
    tracing::info!(operator = admin.user_id, deleted, "Platform batch delete");
    Ok(StatusCode::NO_CONTENT)
}
