//! Assigned Rounds Use Case
//!
//! Lightweight refresh of a user's schedule without a full login.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use kernel::id::UserId;

use crate::application::config::RoundsConfig;
use crate::domain::entity::assigned_round::AssignedRound;
use crate::domain::repository::AssignmentRepository;
use crate::error::RoundsResult;

/// Assigned rounds use case
pub struct AssignedRoundsUseCase<A>
where
    A: AssignmentRepository,
{
    assignment_repo: Arc<A>,
    config: Arc<RoundsConfig>,
}

impl<A> AssignedRoundsUseCase<A>
where
    A: AssignmentRepository,
{
    pub fn new(assignment_repo: Arc<A>, config: Arc<RoundsConfig>) -> Self {
        Self {
            assignment_repo,
            config,
        }
    }

    pub async fn execute(&self, user_id: UserId) -> RoundsResult<Vec<AssignedRound>> {
        self.execute_on(user_id, Local::now().date_naive()).await
    }

    /// Unknown users simply have no rounds
    pub async fn execute_on(&self, user_id: UserId, today: NaiveDate) -> RoundsResult<Vec<AssignedRound>> {
        let window = self.config.schedule_window(today);
        let rounds = self
            .assignment_repo
            .find_assigned_for_user(user_id, &window)
            .await?;

        tracing::info!(
            user_id = %user_id,
            total = rounds.len(),
            "Assigned rounds queried"
        );

        Ok(rounds)
    }
}
