//! Password Hashing and Verification
//!
//! bcrypt-based credential handling for guard accounts:
//! - Zeroization of clear text passwords
//! - Fail-closed verification (any bcrypt error is a mismatch)
//! - Legacy `$2y$` hash compatibility
//! - A process-wide dummy hash for uniform login timing
//!
//! ## Legacy hashes
//! Accounts migrated from the previous system carry `$2y$` hashes. `$2y$` and
//! `$2b$` encode the same algorithm and cost parameters; only the version byte
//! differs. Stored hashes are rewritten to `$2b$` before comparison.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Version prefix written by the legacy hashing implementation
pub const LEGACY_BCRYPT_PREFIX: &str = "$2y$";

/// Version prefix produced and expected by this crate
pub const BCRYPT_PREFIX: &str = "$2b$";

/// Cost used for newly created hashes
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Cost of the dummy hash; matches the cost of the stored `$2y$` account
/// hashes so unknown and known emails take the same time to reject
pub const DUMMY_COST: u32 = 10;

/// Smallest cost bcrypt accepts; tests only
pub const MIN_COST: u32 = 4;

/// Fallback when the dummy hash cannot be computed (OpenBSD test vector)
const FALLBACK_DUMMY_HASH: &str = "$2a$05$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW";

static DUMMY_HASH: LazyLock<HashedPassword> = LazyLock::new(|| {
    match bcrypt::hash("rounds-timing-equalizer", DUMMY_COST) {
        Ok(hash) => HashedPassword(hash),
        Err(e) => {
            tracing::error!(error = %e, "Failed to compute dummy password hash");
            HashedPassword(FALLBACK_DUMMY_HASH.to_string())
        }
    }
});

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(#[from] bcrypt::BcryptError),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// No policy is enforced here: existing accounts must keep logging in with
/// whatever password they were issued.
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("secret123");
/// assert!(format!("{:?}", password).contains("REDACTED"));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with [`DEFAULT_COST`]
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        self.hash_with_cost(DEFAULT_COST)
    }

    /// Hash with an explicit cost; always yields a `$2b$` hash
    pub fn hash_with_cost(&self, cost: u32) -> Result<HashedPassword, PasswordHashError> {
        let hash = bcrypt::hash(self.as_bytes(), cost)?;
        Ok(HashedPassword(hash))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt hash as stored in `usuarios.contrasena`
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a stored hash; format is only checked at verification time
    pub fn from_db(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Shared dummy hash used when no account matches a login attempt
    pub fn dummy() -> &'static HashedPassword {
        &DUMMY_HASH
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }

    /// Work factor encoded in the hash (`$2b$10$...` is 10)
    pub fn cost(&self) -> Option<u32> {
        self.0.get(4..6)?.parse().ok()
    }

    /// Whether this hash carries the legacy `$2y$` version prefix
    pub fn is_legacy(&self) -> bool {
        self.0.starts_with(LEGACY_BCRYPT_PREFIX)
    }

    /// The hash with a legacy prefix rewritten to `$2b$`
    pub fn normalized(&self) -> Cow<'_, str> {
        match self.0.strip_prefix(LEGACY_BCRYPT_PREFIX) {
            Some(rest) => Cow::Owned(format!("{}{}", BCRYPT_PREFIX, rest)),
            None => Cow::Borrowed(&self.0),
        }
    }

    /// Verify a password against this hash
    ///
    /// Fails closed: a malformed hash or any bcrypt error returns `false`.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        match bcrypt::verify(password.as_bytes(), &self.normalized()) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(error = %e, "Password verification failed");
                false
            }
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Plain-string helpers
// ============================================================================

/// Hash a plain password for a new credential
pub fn hash(plain: &str) -> Result<String, PasswordHashError> {
    ClearTextPassword::new(plain)
        .hash()
        .map(HashedPassword::into_db)
}

/// Check a plain password against a stored hash; never errors
pub fn verify(plain: &str, stored_hash: &str) -> bool {
    HashedPassword::from_db(stored_hash).verify(&ClearTextPassword::new(plain))
}
