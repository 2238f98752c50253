//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    assigned_round::AssignedRound,
    checkpoint::{CheckpointLocation, RouteCheckpoint},
    completed_round::{CheckpointScan, CompletedRound, NewCheckpointScan, NewCompletedRound},
    round_type::RoundType,
    user::{User, UserType},
};
pub use repository::{
    AssignmentRepository, CatalogRepository, CompletedRoundRepository, RoundsRepository,
    UserRepository,
};
