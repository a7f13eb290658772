use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{Error, Result},
    AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Liveness. Never touches the database.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Process is running", body = HealthResponse)
    )
)]
#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { ok: true }))
}

/// Connectivity. One `SELECT 1` round trip inside a unit-of-work; any
/// database failure propagates as a server error.
#[utoipa::path(
    get,
    path = "/health/db",
    responses(
        (status = 200, description = "Database round trip succeeded", body = HealthResponse),
        (status = 500, description = "Database unreachable")
    )
)]
#[axum::debug_handler]
pub async fn health_db(State(state): State<AppState>) -> Result<impl IntoResponse> {
    state
        .db
        .unit_of_work(|conn| {
            Box::pin(async move {
                sqlx::query("SELECT 1").execute(conn).await?;
                Ok::<_, Error>(())
            })
        })
        .await?;

    Ok((StatusCode::OK, Json(HealthResponse { ok: true })))
}
