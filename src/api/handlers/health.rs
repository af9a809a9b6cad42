//! Health check endpoint.
//!
//! Tests the database pool directly rather than going through a service.

use std::collections::HashMap;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health_check))
}

/// GET /api/health - Service health
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = HashMap::new();
    checks.insert("database".to_string(), check_database(&state).await);

    let response = HealthResponse::from_checks(crate::pkg_version(), checks);
    let status = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response))
}

async fn check_database(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let (status, message) = match state.db_pool.get().await {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn).await {
            Ok(_) => (HealthStatus::Healthy, "Connected".to_string()),
            Err(e) => (HealthStatus::Unhealthy, format!("Query failed: {}", e)),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not get a connection");
            (HealthStatus::Unhealthy, format!("Connection failed: {}", e))
        }
    };

    ComponentHealth {
        status,
        message: Some(message),
        response_time_ms: Some(start.elapsed().as_millis() as u64),
    }
}
