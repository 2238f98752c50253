//! Login Use Case
//!
//! Verifies a guard's credentials and returns everything the mobile client
//! needs to work offline: the account, reference data, and the rounds
//! scheduled inside the current window with their ordered checkpoints.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use kernel::id::RouteId;
use platform::password::{ClearTextPassword, DUMMY_COST, HashedPassword};

use crate::application::config::RoundsConfig;
use crate::domain::entity::{
    assigned_round::AssignedRound,
    checkpoint::{CheckpointLocation, RouteCheckpoint},
    round_type::RoundType,
    user::{User, UserType},
};
use crate::domain::repository::{AssignmentRepository, CatalogRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{RoundsError, RoundsResult};

/// Login input
pub struct LoginInput {
    pub correo: String,
    pub contrasena: String,
}

/// Assigned round with its resolved route
#[derive(Debug, Clone)]
pub struct AssignedRoundDetail {
    pub round: AssignedRound,
    /// Effective allowed distance (default applied)
    pub allowed_distance: f64,
    /// Route checkpoints ascending by `orden`
    pub checkpoints: Vec<RouteCheckpoint>,
}

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub user: User,
    /// `None` when the user's type row is missing
    pub user_type: Option<UserType>,
    pub round_types: Vec<RoundType>,
    pub checkpoints: Vec<CheckpointLocation>,
    pub assigned_rounds: Vec<AssignedRoundDetail>,
}

/// Login use case
pub struct LoginUseCase<U, C, A>
where
    U: UserRepository,
    C: CatalogRepository,
    A: AssignmentRepository,
{
    user_repo: Arc<U>,
    catalog_repo: Arc<C>,
    assignment_repo: Arc<A>,
    config: Arc<RoundsConfig>,
}

impl<U, C, A> LoginUseCase<U, C, A>
where
    U: UserRepository,
    C: CatalogRepository,
    A: AssignmentRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        catalog_repo: Arc<C>,
        assignment_repo: Arc<A>,
        config: Arc<RoundsConfig>,
    ) -> Self {
        Self {
            user_repo,
            catalog_repo,
            assignment_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> RoundsResult<LoginOutput> {
        self.execute_on(input, Local::now().date_naive()).await
    }

    /// Run with an explicit "today" for the schedule window
    pub async fn execute_on(&self, input: LoginInput, today: NaiveDate) -> RoundsResult<LoginOutput> {
        let user = self.authenticate(input).await?;

        tracing::info!(user_id = %user.id, "Login succeeded");

        let user_type = self.user_repo.find_user_type(user.user_type_id).await?;
        let round_types = self.catalog_repo.list_round_types().await?;
        let checkpoints = self.catalog_repo.list_checkpoint_locations().await?;

        let window = self.config.schedule_window(today);
        let rounds = self
            .assignment_repo
            .find_assigned_for_user(user.id, &window)
            .await?;

        let assigned_rounds = self.attach_routes(rounds).await?;

        tracing::info!(
            user_id = %user.id,
            assigned_rounds = assigned_rounds.len(),
            "Login sync prepared"
        );

        Ok(LoginOutput {
            user,
            user_type,
            round_types,
            checkpoints,
            assigned_rounds,
        })
    }

    /// Resolve the account and check its password.
    ///
    /// Unknown or malformed emails still pay for one bcrypt verification so
    /// response timing does not reveal which accounts exist.
    async fn authenticate(&self, input: LoginInput) -> RoundsResult<User> {
        let LoginInput { correo, contrasena } = input;
        let password = ClearTextPassword::new(contrasena);

        let user = match Email::new(correo) {
            Ok(email) => self.user_repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        if let Some(cost) = stored_hash.as_ref().and_then(HashedPassword::cost) {
            if cost != DUMMY_COST {
                // unknown-email rejections no longer match this account's timing
                tracing::warn!(cost, dummy_cost = DUMMY_COST, "Stored hash cost differs from dummy hash");
            }
        }
        let password_valid = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => hash.verify(&password),
            None => {
                HashedPassword::dummy().verify(&password);
                false
            }
        })
        .await?;

        match user {
            Some(user) if password_valid => Ok(user),
            Some(user) => {
                tracing::warn!(user_id = %user.id, "Login failed: wrong password");
                Err(RoundsError::InvalidCredentials)
            }
            None => {
                tracing::warn!("Login failed: unknown email");
                Err(RoundsError::InvalidCredentials)
            }
        }
    }

    async fn attach_routes(&self, rounds: Vec<AssignedRound>) -> RoundsResult<Vec<AssignedRoundDetail>> {
        let route_ids: Vec<RouteId> = rounds
            .iter()
            .map(|r| r.route_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut by_route: HashMap<RouteId, Vec<RouteCheckpoint>> = HashMap::new();
        if !route_ids.is_empty() {
            for checkpoint in self.assignment_repo.find_route_checkpoints(&route_ids).await? {
                by_route.entry(checkpoint.route_id).or_default().push(checkpoint);
            }
        }
        for checkpoints in by_route.values_mut() {
            checkpoints.sort_by_key(|c| c.order);
        }

        let default_distance = self.config.default_allowed_distance;
        Ok(rounds
            .into_iter()
            .map(|round| AssignedRoundDetail {
                allowed_distance: round.allowed_distance_or(default_distance),
                checkpoints: by_route.get(&round.route_id).cloned().unwrap_or_default(),
                round,
            })
            .collect())
    }
}
