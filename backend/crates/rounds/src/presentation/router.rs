//! Rounds Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::RoundsConfig;
use crate::domain::repository::RoundsRepository;
use crate::infra::postgres::PgRoundsRepository;
use crate::presentation::handlers::{self, RoundsAppState};

/// Create the Rounds router with PostgreSQL repository
pub fn rounds_router(repo: PgRoundsRepository, config: RoundsConfig) -> Router {
    rounds_router_generic(repo, config)
}

/// Create a generic Rounds router for any repository implementation
pub fn rounds_router_generic<R>(repo: R, config: RoundsConfig) -> Router
where
    R: RoundsRepository,
{
    let state = RoundsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/ping", get(handlers::ping))
        .route("/rondas/subir", post(handlers::submit_round::<R>))
        .route(
            "/rondas/asignadas/{id_usuario}",
            get(handlers::assigned_rounds::<R>),
        )
        .route(
            "/rondas/ejecutadas/{id_ronda_usuario}",
            get(handlers::completed_round::<R>),
        )
        .with_state(state)
}
