//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing and verification (bcrypt, legacy `$2y$` aware)

pub mod password;
