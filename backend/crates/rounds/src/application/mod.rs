//! Application Layer
//!
//! Use cases and application services.

pub mod assigned_rounds;
pub mod completed_round;
pub mod config;
pub mod login;
pub mod submit_round;

// Re-exports
pub use assigned_rounds::AssignedRoundsUseCase;
pub use completed_round::GetCompletedRoundUseCase;
pub use config::RoundsConfig;
pub use login::{AssignedRoundDetail, LoginInput, LoginOutput, LoginUseCase};
pub use submit_round::{ScanInput, SubmitRoundInput, SubmitRoundOutput, SubmitRoundUseCase};
