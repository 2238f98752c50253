//! Entity Module

pub mod assigned_round;
pub mod checkpoint;
pub mod completed_round;
pub mod round_type;
pub mod user;
