//! Completed Round Entities
//!
//! Rounds uploaded by the mobile client after a guard finishes walking a route.
//! Both entities are write-once: created together by a submission and never
//! updated afterwards.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use kernel::id::{AssignedRoundId, CheckpointScanId, CompletedRoundId, UserId};

use crate::domain::value_object::coordinate::Coordinate;

/// Completed round ready to persist (no id yet)
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompletedRound {
    pub user_id: UserId,
    pub assigned_round_id: AssignedRoundId,
    pub date: NaiveDate,
    pub started_at: NaiveTime,
    pub finished_at: Option<NaiveTime>,
    /// Scans in the order the guard recorded them
    pub scans: Vec<NewCheckpointScan>,
}

impl NewCompletedRound {
    /// Uploaded rounds are synchronized by definition
    pub const SYNCHRONIZED: bool = true;
}

/// Checkpoint scan ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct NewCheckpointScan {
    pub scanned_at: NaiveDateTime,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    pub qr_code: Option<String>,
    pub verified: bool,
}

/// Stored completed round (`rondas_usuarios`) with its scans
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRound {
    pub id: CompletedRoundId,
    pub user_id: UserId,
    pub assigned_round_id: AssignedRoundId,
    pub date: NaiveDate,
    pub started_at: NaiveTime,
    pub finished_at: Option<NaiveTime>,
    pub synchronized: bool,
    /// Ordered by scan id, i.e. submission order
    pub scans: Vec<CheckpointScan>,
}

/// Stored checkpoint scan (`coordenadas_usuarios`)
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointScan {
    pub id: CheckpointScanId,
    pub completed_round_id: CompletedRoundId,
    pub scanned_at: NaiveDateTime,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    pub qr_code: Option<String>,
    pub verified: bool,
}
