//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;

use kernel::id::{CompletedRoundId, UserId};

use crate::application::config::RoundsConfig;
use crate::application::{
    AssignedRoundsUseCase, GetCompletedRoundUseCase, LoginInput, LoginUseCase, SubmitRoundUseCase,
};
use crate::domain::repository::RoundsRepository;
use crate::error::RoundsResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, PingResponse, ProblemDetails, RondaEjecutadaResponse,
    RondasAsignadasResponse, SubirRondaRequest, SubirRondaResponse,
};

/// Shared state for rounds handlers
#[derive(Clone)]
pub struct RoundsAppState<R>
where
    R: RoundsRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<RoundsConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Account, reference data and assigned rounds", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
pub async fn login<R>(
    State(state): State<RoundsAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> RoundsResult<Json<LoginResponse>>
where
    R: RoundsRepository,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        correo: req.correo,
        contrasena: req.contrasena,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse::from(output)))
}

// ============================================================================
// Ping
// ============================================================================

/// GET /api/ping
#[utoipa::path(
    get,
    path = "/api/ping",
    responses((status = 200, description = "API is up", body = PingResponse)),
    tags = ["auth"],
    operation_id = "ping"
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse::pong())
}

// ============================================================================
// Round Submission
// ============================================================================

/// POST /api/rondas/subir
#[utoipa::path(
    post,
    path = "/api/rondas/subir",
    request_body = SubirRondaRequest,
    responses(
        (status = 200, description = "Round and scans stored", body = SubirRondaResponse),
        (status = 400, description = "Malformed date, timestamp or coordinate", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["rondas"],
    operation_id = "submitRound"
)]
pub async fn submit_round<R>(
    State(state): State<RoundsAppState<R>>,
    Json(req): Json<SubirRondaRequest>,
) -> RoundsResult<Json<SubirRondaResponse>>
where
    R: RoundsRepository,
{
    let use_case = SubmitRoundUseCase::new(state.repo.clone());

    let output = use_case.execute(req.into()).await?;

    Ok(Json(SubirRondaResponse::from(output)))
}

// ============================================================================
// Assigned Rounds
// ============================================================================

/// GET /api/rondas/asignadas/{id_usuario}
#[utoipa::path(
    get,
    path = "/api/rondas/asignadas/{id_usuario}",
    params(("id_usuario" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Rounds scheduled today and tomorrow", body = RondasAsignadasResponse),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["rondas"],
    operation_id = "assignedRounds"
)]
pub async fn assigned_rounds<R>(
    State(state): State<RoundsAppState<R>>,
    Path(id_usuario): Path<i32>,
) -> RoundsResult<Json<RondasAsignadasResponse>>
where
    R: RoundsRepository,
{
    let use_case = AssignedRoundsUseCase::new(state.repo.clone(), state.config.clone());

    let rounds = use_case.execute(UserId::new(id_usuario)).await?;

    Ok(Json(RondasAsignadasResponse::from(rounds)))
}

// ============================================================================
// Completed Round
// ============================================================================

/// GET /api/rondas/ejecutadas/{id_ronda_usuario}
#[utoipa::path(
    get,
    path = "/api/rondas/ejecutadas/{id_ronda_usuario}",
    params(("id_ronda_usuario" = i32, Path, description = "Completed round id")),
    responses(
        (status = 200, description = "Stored round with its scans", body = RondaEjecutadaResponse),
        (status = 404, description = "No such round", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["rondas"],
    operation_id = "completedRound"
)]
pub async fn completed_round<R>(
    State(state): State<RoundsAppState<R>>,
    Path(id_ronda_usuario): Path<i32>,
) -> RoundsResult<Json<RondaEjecutadaResponse>>
where
    R: RoundsRepository,
{
    let use_case = GetCompletedRoundUseCase::new(state.repo.clone());

    let round = use_case.execute(CompletedRoundId::new(id_ronda_usuario)).await?;

    Ok(Json(RondaEjecutadaResponse::from(round)))
}
