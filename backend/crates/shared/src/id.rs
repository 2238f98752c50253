//! Common ID Types
//!
//! Type-safe wrappers over the integer surrogate keys used by every table.

use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper over a database `INTEGER` key
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// let id = UserId::new(7);
/// assert_eq!(id.value(), 7);
/// ```
pub struct Id<T> {
    value: i32,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap a raw key
    pub const fn new(value: i32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the raw key
    pub const fn value(&self) -> i32 {
        self.value
    }
}

// Manual impls so markers don't need to derive anything.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i32> for Id<T> {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i32 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    pub struct UserType;
    pub struct User;
    pub struct RoundType;
    pub struct Checkpoint;
    pub struct Route;
    pub struct AssignedRound;
    pub struct CompletedRound;
    pub struct CheckpointScan;
}

/// Type aliases for common IDs
pub type UserTypeId = Id<markers::UserType>;
pub type UserId = Id<markers::User>;
pub type RoundTypeId = Id<markers::RoundType>;
pub type CheckpointId = Id<markers::Checkpoint>;
pub type RouteId = Id<markers::Route>;
pub type AssignedRoundId = Id<markers::AssignedRound>;
pub type CompletedRoundId = Id<markers::CompletedRound>;
pub type CheckpointScanId = Id<markers::CheckpointScan>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_roundtrip() {
        let id: UserId = Id::from(42);
        assert_eq!(id.value(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{:?}", id), "Id(42)");
    }

    #[test]
    fn test_id_is_hashable_and_ordered() {
        let mut set: HashSet<RouteId> = HashSet::new();
        set.insert(RouteId::new(1));
        set.insert(RouteId::new(1));
        set.insert(RouteId::new(2));
        assert_eq!(set.len(), 2);
        assert!(RouteId::new(1) < RouteId::new(2));
    }
}
