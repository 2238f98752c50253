//! Rounds Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router, OpenAPI document
//!
//! ## Features
//! - Guard login returning the offline working set (reference data plus
//!   rounds scheduled today and tomorrow with ordered checkpoints)
//! - Lightweight schedule refresh per user
//! - Atomic upload of completed rounds and their checkpoint scans
//! - Read-back of an uploaded round
//!
//! ## Security Model
//! - bcrypt password verification, legacy `$2y$` hashes accepted
//! - Unknown emails and wrong passwords are indistinguishable, including timing
//! - No sessions: every login is a standalone credential check

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::RoundsConfig;
pub use error::{RoundsError, RoundsResult};
pub use infra::postgres::PgRoundsRepository;
pub use presentation::doc::ApiDoc;
pub use presentation::router::{rounds_router, rounds_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgRoundsRepository as RoundsStore;
}
