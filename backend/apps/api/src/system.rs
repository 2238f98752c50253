//! Service-level endpoints: root banner and health check

use axum::{Json, Router, extract::State, routing::get};
use rounds::PgRoundsRepository;
use serde::Serialize;

pub const SERVICE_NAME: &str = "API Sistema de Rondas";
pub const SERVICE_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

impl HealthResponse {
    pub fn from_database(connected: bool) -> Self {
        if connected {
            Self {
                status: "healthy",
                database: "connected",
            }
        } else {
            Self {
                status: "unhealthy",
                database: "disconnected",
            }
        }
    }
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE_NAME,
        status: "active",
        version: SERVICE_VERSION,
    })
}

/// GET /health
///
/// Always 200; the body carries the database state.
///
/// The server refuses to start without a reachable database (migrations run
/// first), so `"disconnected"` only ever reports an outage that began after
/// startup.
pub async fn health(State(store): State<PgRoundsRepository>) -> Json<HealthResponse> {
    let connected = match store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            false
        }
    };

    Json(HealthResponse::from_database(connected))
}

/// Root and health routes
pub fn system_router(store: PgRoundsRepository) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(store)
}
