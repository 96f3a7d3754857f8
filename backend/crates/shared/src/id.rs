//! Common ID Types
//!
//! Type-safe wrappers around store-assigned integer keys.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Rejected raw identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("identifier must be a positive integer (got {0})")]
pub struct InvalidId(pub i64);

/// Generic typed ID wrapper
///
/// Store-assigned keys start at 1, so zero and negative values never
/// name a record.
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// let id = UserId::new(7).unwrap();
/// assert_eq!(id.get(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw key, rejecting non-positive values
    pub fn new(value: i64) -> Result<Self, InvalidId> {
        if value <= 0 {
            return Err(InvalidId(value));
        }
        Ok(Self::from_db(value))
    }

    /// Wrap a key read back from the store (assumed valid)
    pub fn from_db(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Wrap an optional wire value where `0` means "not set"
    pub fn from_optional(value: Option<i64>) -> Result<Option<Self>, InvalidId> {
        match value {
            None | Some(0) => Ok(None),
            Some(v) => Self::new(v).map(Some),
        }
    }

    /// Get the raw key
    pub fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls so that `T` itself needs no bounds.
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

impl<T> TryFrom<i64> for Id<T> {
    type Error = InvalidId;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Todo IDs
    pub struct Todo;

    /// Marker for Category IDs
    pub struct Category;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type TodoId = Id<markers::Todo>;
pub type CategoryId = Id<markers::Category>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(UserId::new(0), Err(InvalidId(0)));
        assert_eq!(TodoId::new(-3), Err(InvalidId(-3)));
        assert_eq!(CategoryId::new(10).unwrap().get(), 10);
    }

    #[test]
    fn test_from_optional_treats_zero_as_unset() {
        assert_eq!(CategoryId::from_optional(None), Ok(None));
        assert_eq!(CategoryId::from_optional(Some(0)), Ok(None));
        assert_eq!(
            CategoryId::from_optional(Some(4)),
            Ok(Some(CategoryId::from_db(4)))
        );
        assert!(CategoryId::from_optional(Some(-1)).is_err());
    }

    #[test]
    fn test_serde_is_a_bare_integer() {
        let id = TodoId::from_db(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: TodoId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);

        assert!(serde_json::from_str::<TodoId>("0").is_err());
    }
}
