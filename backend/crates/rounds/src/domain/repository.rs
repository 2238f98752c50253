//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{
    assigned_round::AssignedRound,
    checkpoint::{CheckpointLocation, RouteCheckpoint},
    completed_round::{CompletedRound, NewCompletedRound},
    round_type::RoundType,
    user::{User, UserType},
};
use crate::domain::value_object::{email::Email, schedule_window::ScheduleWindow};
use crate::error::RoundsResult;
use kernel::id::{CompletedRoundId, RouteId, UserId, UserTypeId};

/// User account repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by exact email match
    async fn find_by_email(&self, email: &Email) -> RoundsResult<Option<User>>;

    /// Find a user type label
    async fn find_user_type(&self, type_id: UserTypeId) -> RoundsResult<Option<UserType>>;
}

/// Reference data repository trait
#[trait_variant::make(CatalogRepository: Send)]
pub trait LocalCatalogRepository {
    /// All round types
    async fn list_round_types(&self) -> RoundsResult<Vec<RoundType>>;

    /// All checkpoint locations
    async fn list_checkpoint_locations(&self) -> RoundsResult<Vec<CheckpointLocation>>;
}

/// Round assignment repository trait
#[trait_variant::make(AssignmentRepository: Send)]
pub trait LocalAssignmentRepository {
    /// Rounds assigned to a user with an execution date inside `window`,
    /// ordered by date, time, then id
    async fn find_assigned_for_user(
        &self,
        user_id: UserId,
        window: &ScheduleWindow,
    ) -> RoundsResult<Vec<AssignedRound>>;

    /// Checkpoints of every listed route in one lookup, ordered by route then `orden`
    async fn find_route_checkpoints(&self, route_ids: &[RouteId]) -> RoundsResult<Vec<RouteCheckpoint>>;
}

/// Completed round repository trait
#[trait_variant::make(CompletedRoundRepository: Send)]
pub trait LocalCompletedRoundRepository {
    /// Persist a round and all its scans atomically
    async fn create(&self, round: &NewCompletedRound) -> RoundsResult<CompletedRoundId>;

    /// Find a round with its scans in submission order
    async fn find_by_id(&self, id: CompletedRoundId) -> RoundsResult<Option<CompletedRound>>;
}

/// Everything the HTTP layer needs from a single store
pub trait RoundsRepository:
    UserRepository
    + CatalogRepository
    + AssignmentRepository
    + CompletedRoundRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> RoundsRepository for T where
    T: UserRepository
        + CatalogRepository
        + AssignmentRepository
        + CompletedRoundRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
