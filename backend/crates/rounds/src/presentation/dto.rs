//! API DTOs (Data Transfer Objects)
//!
//! Field names are the Spanish snake_case keys the mobile client already
//! speaks; they are part of the wire contract.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::login::{AssignedRoundDetail, LoginOutput};
use crate::application::submit_round::{ScanInput, SubmitRoundInput, SubmitRoundOutput};
use crate::domain::entity::{
    assigned_round::AssignedRound,
    checkpoint::{CheckpointLocation, RouteCheckpoint},
    completed_round::{CheckpointScan, CompletedRound},
    round_type::RoundType,
    user::{User, UserType},
};
use crate::domain::value_object::round_timestamp::{RoundDate, RoundTimestamp, format_time};

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub correo: String,
    pub contrasena: String,
}

/// User type label
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TipoUsuarioResponse {
    pub tipo_id: i32,
    pub nombre_tipo_usuario: String,
}

/// Authenticated user
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UsuarioResponse {
    pub id_usuario: i32,
    pub id_tipo: i32,
    pub nombre: String,
    pub correo: Option<String>,
    /// Omitted when the user's type row is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_usuario: Option<TipoUsuarioResponse>,
}

/// Round type
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TipoRondaResponse {
    pub id_tipo: i32,
    pub nombre_tipo_ronda: String,
}

/// Checkpoint location
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CoordenadaAdminResponse {
    pub id_coordenada_admin: i32,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub nombre_coordenada: String,
    pub codigo_qr: Option<String>,
}

/// Checkpoint reference within a route
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RondaCoordenadaResponse {
    pub id_coordenada_admin: i32,
    pub orden: i32,
}

/// Assigned round with its route
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RondaAsignadaResponse {
    pub id_ronda_asignada: i32,
    pub id_tipo: i32,
    pub id_usuario: i32,
    /// `YYYY-MM-DD`
    #[schema(example = "2025-11-03")]
    pub fecha_de_ejecucion: String,
    /// `YYYY-MM-DDTHH:MM:SS`
    #[schema(example = "2025-11-03T14:30:00")]
    pub hora_de_ejecucion: String,
    pub distancia_permitida: f64,
    pub coordenadas: Vec<RondaCoordenadaResponse>,
}

/// Login response: everything the client needs to work offline
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub usuario: UsuarioResponse,
    pub tipos_ronda: Vec<TipoRondaResponse>,
    pub coordenadas_admin: Vec<CoordenadaAdminResponse>,
    pub rondas_asignadas: Vec<RondaAsignadaResponse>,
}

impl From<UserType> for TipoUsuarioResponse {
    fn from(t: UserType) -> Self {
        Self {
            tipo_id: t.id.value(),
            nombre_tipo_usuario: t.name,
        }
    }
}

impl UsuarioResponse {
    fn new(user: User, user_type: Option<UserType>) -> Self {
        Self {
            id_usuario: user.id.value(),
            id_tipo: user.user_type_id.value(),
            nombre: user.name,
            correo: user.email,
            tipo_usuario: user_type.map(TipoUsuarioResponse::from),
        }
    }
}

impl From<RoundType> for TipoRondaResponse {
    fn from(t: RoundType) -> Self {
        Self {
            id_tipo: t.id.value(),
            nombre_tipo_ronda: t.name,
        }
    }
}

impl From<CheckpointLocation> for CoordenadaAdminResponse {
    fn from(c: CheckpointLocation) -> Self {
        Self {
            id_coordenada_admin: c.id.value(),
            latitud: c.latitude,
            longitud: c.longitude,
            nombre_coordenada: c.name,
            codigo_qr: c.qr_code,
        }
    }
}

impl From<RouteCheckpoint> for RondaCoordenadaResponse {
    fn from(c: RouteCheckpoint) -> Self {
        Self {
            id_coordenada_admin: c.checkpoint_id.value(),
            orden: c.order,
        }
    }
}

impl From<AssignedRoundDetail> for RondaAsignadaResponse {
    fn from(detail: AssignedRoundDetail) -> Self {
        let round = detail.round;
        Self {
            id_ronda_asignada: round.id.value(),
            id_tipo: round.round_type_id.value(),
            id_usuario: round.user_id.value(),
            fecha_de_ejecucion: RoundDate::from(round.scheduled_date).to_string(),
            hora_de_ejecucion: RoundTimestamp::from(round.scheduled_at()).to_string(),
            distancia_permitida: detail.allowed_distance,
            coordenadas: detail.checkpoints.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<LoginOutput> for LoginResponse {
    fn from(output: LoginOutput) -> Self {
        Self {
            usuario: UsuarioResponse::new(output.user, output.user_type),
            tipos_ronda: output.round_types.into_iter().map(Into::into).collect(),
            coordenadas_admin: output.checkpoints.into_iter().map(Into::into).collect(),
            rondas_asignadas: output.assigned_rounds.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Ping
// ============================================================================

/// Liveness response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
    pub status: String,
}

impl PingResponse {
    pub fn pong() -> Self {
        Self {
            message: "pong".to_string(),
            status: "ok".to_string(),
        }
    }
}

// ============================================================================
// Round Submission
// ============================================================================

/// One checkpoint scan
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CoordenadaUsuarioRequest {
    /// `YYYY-MM-DDTHH:MM:SS`
    #[schema(example = "2025-11-03T14:35:12")]
    pub hora_actual: String,
    #[serde(default)]
    pub latitud_actual: Option<f64>,
    #[serde(default)]
    pub longitud_actual: Option<f64>,
    #[serde(default)]
    pub codigo_qr: Option<String>,
    pub verificador: bool,
}

/// Completed round upload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubirRondaRequest {
    pub id_usuario: i32,
    pub id_ronda_asignada: i32,
    /// `YYYY-MM-DD`
    #[schema(example = "2025-11-03")]
    pub fecha: String,
    /// `YYYY-MM-DDTHH:MM:SS`
    #[schema(example = "2025-11-03T14:30:00")]
    pub hora_inicio: String,
    /// `YYYY-MM-DDTHH:MM:SS`
    #[schema(example = "2025-11-03T16:30:00")]
    pub hora_final: String,
    pub coordenadas: Vec<CoordenadaUsuarioRequest>,
}

/// Completed round upload result
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubirRondaResponse {
    pub success: bool,
    pub message: String,
    pub id_ronda_usuario: Option<i32>,
}

impl From<CoordenadaUsuarioRequest> for ScanInput {
    fn from(req: CoordenadaUsuarioRequest) -> Self {
        Self {
            hora_actual: req.hora_actual,
            latitud_actual: req.latitud_actual,
            longitud_actual: req.longitud_actual,
            codigo_qr: req.codigo_qr,
            verificador: req.verificador,
        }
    }
}

impl From<SubirRondaRequest> for SubmitRoundInput {
    fn from(req: SubirRondaRequest) -> Self {
        Self {
            id_usuario: req.id_usuario,
            id_ronda_asignada: req.id_ronda_asignada,
            fecha: req.fecha,
            hora_inicio: req.hora_inicio,
            hora_final: req.hora_final,
            coordenadas: req.coordenadas.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<SubmitRoundOutput> for SubirRondaResponse {
    fn from(output: SubmitRoundOutput) -> Self {
        Self {
            success: true,
            message: output.message(),
            id_ronda_usuario: Some(output.id_ronda_usuario.value()),
        }
    }
}

// ============================================================================
// Assigned Rounds
// ============================================================================

/// Schedule entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RondaAsignadaResumen {
    pub id_ronda_asignada: i32,
    /// `YYYY-MM-DD`
    pub fecha: String,
    /// `HH:MM:SS`
    pub hora: String,
}

/// Assigned rounds in the current window
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RondasAsignadasResponse {
    pub total: usize,
    pub rondas: Vec<RondaAsignadaResumen>,
}

impl From<AssignedRound> for RondaAsignadaResumen {
    fn from(round: AssignedRound) -> Self {
        Self {
            id_ronda_asignada: round.id.value(),
            fecha: RoundDate::from(round.scheduled_date).to_string(),
            hora: format_time(round.scheduled_time),
        }
    }
}

impl From<Vec<AssignedRound>> for RondasAsignadasResponse {
    fn from(rounds: Vec<AssignedRound>) -> Self {
        Self {
            total: rounds.len(),
            rondas: rounds.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Completed Round Read-back
// ============================================================================

/// Stored checkpoint scan
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CoordenadaUsuarioResponse {
    pub id: i32,
    /// `YYYY-MM-DDTHH:MM:SS`
    pub hora_actual: String,
    pub latitud_actual: Option<f64>,
    pub longitud_actual: Option<f64>,
    pub codigo_qr: Option<String>,
    pub verificador: bool,
}

/// Stored completed round with scans in submission order
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RondaEjecutadaResponse {
    pub id_ronda_usuario: i32,
    pub id_usuario: i32,
    pub id_ronda_asignada: i32,
    /// `YYYY-MM-DD`
    pub fecha: String,
    /// `YYYY-MM-DDTHH:MM:SS`, date taken from `fecha`
    pub hora_inicio: String,
    /// `YYYY-MM-DDTHH:MM:SS`, date taken from `fecha`
    pub hora_final: Option<String>,
    pub sincronizada: bool,
    pub coordenadas: Vec<CoordenadaUsuarioResponse>,
}

impl From<CheckpointScan> for CoordenadaUsuarioResponse {
    fn from(scan: CheckpointScan) -> Self {
        Self {
            id: scan.id.value(),
            hora_actual: RoundTimestamp::from(scan.scanned_at).to_string(),
            latitud_actual: scan.latitude.and_then(|c| c.to_f64()),
            longitud_actual: scan.longitude.and_then(|c| c.to_f64()),
            codigo_qr: scan.qr_code,
            verificador: scan.verified,
        }
    }
}

impl From<CompletedRound> for RondaEjecutadaResponse {
    fn from(round: CompletedRound) -> Self {
        let date = round.date;
        let on_date = |time: NaiveTime| RoundTimestamp::from(date.and_time(time)).to_string();
        Self {
            id_ronda_usuario: round.id.value(),
            id_usuario: round.user_id.value(),
            id_ronda_asignada: round.assigned_round_id.value(),
            fecha: RoundDate::from(date).to_string(),
            hora_inicio: on_date(round.started_at),
            hora_final: round.finished_at.map(on_date),
            sincronizada: round.synchronized,
            coordenadas: round.scans.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// RFC 7807 problem details body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    #[schema(example = "https://httpstatuses.io/401")]
    pub type_url: String,
    #[schema(example = "Unauthorized")]
    pub title: String,
    #[schema(example = 401)]
    pub status: u16,
    #[schema(example = "Correo o contraseña incorrectos")]
    pub detail: String,
}
