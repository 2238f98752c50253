//! Get Completed Round Use Case

use std::sync::Arc;

use kernel::id::CompletedRoundId;

use crate::domain::entity::completed_round::CompletedRound;
use crate::domain::repository::CompletedRoundRepository;
use crate::error::{RoundsError, RoundsResult};

/// Read back an uploaded round with its scans
pub struct GetCompletedRoundUseCase<R>
where
    R: CompletedRoundRepository,
{
    round_repo: Arc<R>,
}

impl<R> GetCompletedRoundUseCase<R>
where
    R: CompletedRoundRepository,
{
    pub fn new(round_repo: Arc<R>) -> Self {
        Self { round_repo }
    }

    pub async fn execute(&self, id: CompletedRoundId) -> RoundsResult<CompletedRound> {
        self.round_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| RoundsError::NotFound("Ronda".to_string()))
    }
}
