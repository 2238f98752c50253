//! Value Object Module

pub mod coordinate;
pub mod email;
pub mod round_timestamp;
pub mod schedule_window;
