pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::Config;
use crate::database::Database;

#[derive(OpenApi)]
#[openapi(
    paths(routes::health::health, routes::health::health_db),
    components(schemas(routes::health::HealthResponse))
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Health endpoints plus the OpenAPI document, with CORS and request tracing.
pub fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/health/db", get(routes::health::health_db))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::cors::cors_layer(&config.cors_allowed_origins)),
        )
}

/// Startup path of the server binary.
///
/// The pool is created lazily, so the process comes up and answers `/health`
/// even while the database is unreachable; `/health/db` reports that per
/// request. Schema migrations are applied by the `seed` binary.
pub fn app(config: &Config) -> error::Result<(Router, Database)> {
    let db = Database::connect_lazy(config)?;
    let router = build_router(AppState::new(db.clone()), config);
    Ok((router, db))
}
