//! Send log handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::LOG_TAG;
use crate::api::dto::{
    ErrorResponse, LogQuery, LogResponse, PagedResponse, PaginationParams, parse_id_list,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedQuery;

/// Creates log routes.
///
/// Routes:
/// - GET /          - List own logs, newest first
/// - GET /{id}       - Get log
/// - DELETE /{ids}  - Delete comma-separated logs
pub fn log_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_logs))
        .routes(routes!(get_log, delete_logs))
}

/// GET /api/notify/logs - List own send logs
#[utoipa::path(
    get,
    path = "/",
    tag = LOG_TAG,
    params(PaginationParams, LogQuery),
    responses(
        (status = 200, description = "Paginated send logs", body = PagedResponse<LogResponse>)
    ),
    security(("userHeader" = []))
)]
async fn list_logs(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(query): ValidatedQuery<LogQuery>,
) -> AppResult<Json<PagedResponse<LogResponse>>> {
    let filter = query.into_filter(auth_user.user_id);
    let (logs, total) = state
        .services
        .logs
        .list_logs(&filter, params.offset(), params.limit())
        .await?;

    let responses = logs.into_iter().map(LogResponse::from).collect();
    Ok(Json(PagedResponse::new(responses, &params, total)))
}

/// GET /api/notify/logs/{id} - Get send log
#[utoipa::path(
    get,
    path = "/{id}",
    tag = LOG_TAG,
    params(("id" = i64, Path, description = "Log ID")),
    responses(
        (status = 200, description = "Log found", body = LogResponse),
        (status = 403, description = "Log belongs to another user", body = ErrorResponse),
        (status = 404, description = "Log not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn get_log(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<LogResponse>> {
    let log = state.services.logs.get_log(auth_user.user_id, id).await?;
    Ok(Json(LogResponse::from(log)))
}

/// DELETE /api/notify/logs/{ids} - Delete send logs
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = LOG_TAG,
    params(("id" = String, Path, description = "Comma-separated log IDs, e.g. `3,5`")),
    responses(
        (status = 204, description = "Logs deleted"),
        (status = 400, description = "Malformed id list", body = ErrorResponse),
        (status = 403, description = "A log belongs to another user", body = ErrorResponse),
        (status = 404, description = "A log was not found", body = ErrorResponse)
    ),
    security(("userHeader" = []))
)]
async fn delete_logs(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(raw_ids): Path<String>,
) -> AppResult<StatusCode> {
    let ids = parse_id_list(&raw_ids)?;
    state.services.logs.delete_logs(auth_user.user_id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
