//! Checkpoint Entities
//!
//! Physical checkpoints guards scan, and their placement along routes.

use chrono::NaiveDateTime;
use kernel::id::{CheckpointId, RouteId};

/// Administrator-defined checkpoint (`coordenadas_admin`)
///
/// Coordinates are optional: some checkpoints are identified by QR code only.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointLocation {
    pub id: CheckpointId,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub qr_code: Option<String>,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Position of a checkpoint within a route (`ruta_coordenadas`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteCheckpoint {
    pub route_id: RouteId,
    pub checkpoint_id: CheckpointId,
    /// Traversal order, unique within a route
    pub order: i32,
}
