//! User Entity
//!
//! Guard accounts and their type labels. Accounts are provisioned out-of-band;
//! this crate only reads them.

use kernel::id::{UserId, UserTypeId};
use platform::password::HashedPassword;

/// User type label (`tipos_de_usuarios`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserType {
    pub id: UserTypeId,
    pub name: String,
}

/// User account (`usuarios`)
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub user_type_id: UserTypeId,
    /// Display name
    pub name: String,
    /// Stored bcrypt hash, possibly with the legacy `$2y$` prefix
    pub password_hash: HashedPassword,
    /// Login key; accounts without one cannot log in
    pub email: Option<String>,
}

impl User {
    /// Build from stored columns
    pub fn from_db(
        id: i32,
        user_type_id: i32,
        name: String,
        password_hash: String,
        email: Option<String>,
    ) -> Self {
        Self {
            id: UserId::new(id),
            user_type_id: UserTypeId::new(user_type_id),
            name,
            password_hash: HashedPassword::from_db(password_hash),
            email,
        }
    }
}
