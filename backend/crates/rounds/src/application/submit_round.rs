//! Submit Round Use Case
//!
//! Accepts a completed round from the mobile client. Every field is parsed
//! before anything is written, so a malformed scan deep in the list still
//! leaves the store untouched. Persistence itself is a single transaction in
//! the repository.

use std::sync::Arc;

use kernel::id::{AssignedRoundId, CompletedRoundId, UserId};

use crate::domain::entity::completed_round::{NewCheckpointScan, NewCompletedRound};
use crate::domain::repository::CompletedRoundRepository;
use crate::domain::value_object::{
    coordinate::{Axis, Coordinate},
    round_timestamp::{RoundDate, RoundTimestamp},
};
use crate::error::RoundsResult;

/// One checkpoint scan as reported by the client
#[derive(Debug, Clone)]
pub struct ScanInput {
    /// `YYYY-MM-DDTHH:MM:SS`
    pub hora_actual: String,
    pub latitud_actual: Option<f64>,
    pub longitud_actual: Option<f64>,
    pub codigo_qr: Option<String>,
    pub verificador: bool,
}

/// Submit round input
#[derive(Debug, Clone)]
pub struct SubmitRoundInput {
    pub id_usuario: i32,
    pub id_ronda_asignada: i32,
    /// `YYYY-MM-DD`
    pub fecha: String,
    /// `YYYY-MM-DDTHH:MM:SS`
    pub hora_inicio: String,
    /// `YYYY-MM-DDTHH:MM:SS`
    pub hora_final: String,
    pub coordenadas: Vec<ScanInput>,
}

/// Submit round output
#[derive(Debug, Clone, Copy)]
pub struct SubmitRoundOutput {
    pub id_ronda_usuario: CompletedRoundId,
    pub scan_count: usize,
}

impl SubmitRoundOutput {
    pub fn message(&self) -> String {
        format!(
            "Ronda guardada exitosamente con {} coordenadas",
            self.scan_count
        )
    }
}

/// Submit round use case
pub struct SubmitRoundUseCase<R>
where
    R: CompletedRoundRepository,
{
    round_repo: Arc<R>,
}

impl<R> SubmitRoundUseCase<R>
where
    R: CompletedRoundRepository,
{
    pub fn new(round_repo: Arc<R>) -> Self {
        Self { round_repo }
    }

    pub async fn execute(&self, input: SubmitRoundInput) -> RoundsResult<SubmitRoundOutput> {
        let round = parse_submission(input)?;
        let scan_count = round.scans.len();

        let id = self.round_repo.create(&round).await?;

        tracing::info!(
            id_ronda_usuario = %id,
            user_id = %round.user_id,
            assigned_round_id = %round.assigned_round_id,
            scans = scan_count,
            "Completed round stored"
        );

        Ok(SubmitRoundOutput {
            id_ronda_usuario: id,
            scan_count,
        })
    }
}

/// Convert the wire input into a persistable round.
///
/// End before start is accepted as-is.
pub fn parse_submission(input: SubmitRoundInput) -> RoundsResult<NewCompletedRound> {
    let date = RoundDate::parse(&input.fecha)?;
    let started_at = RoundTimestamp::parse(&input.hora_inicio)?;
    let finished_at = RoundTimestamp::parse(&input.hora_final)?;

    let scans = input
        .coordenadas
        .into_iter()
        .map(parse_scan)
        .collect::<RoundsResult<Vec<_>>>()?;

    Ok(NewCompletedRound {
        user_id: UserId::new(input.id_usuario),
        assigned_round_id: AssignedRoundId::new(input.id_ronda_asignada),
        date: date.date(),
        started_at: started_at.time(),
        finished_at: Some(finished_at.time()),
        scans,
    })
}

fn parse_scan(scan: ScanInput) -> RoundsResult<NewCheckpointScan> {
    Ok(NewCheckpointScan {
        scanned_at: RoundTimestamp::parse(&scan.hora_actual)?.datetime(),
        latitude: Coordinate::from_reported(Axis::Latitude, scan.latitud_actual)?,
        longitude: Coordinate::from_reported(Axis::Longitude, scan.longitud_actual)?,
        qr_code: scan.codigo_qr,
        verified: scan.verificador,
    })
}
