//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`StemId`] - Opaque key for one artifact in the naming hierarchy
//!
//! # Validation
//!
//! A `StemId` rejects only the empty string at construction time. Full
//! grammar validation lives in [`crate::core::naming`], because the graph
//! legitimately holds virtual nodes that are referenced by declarations but
//! never parse (and never need to).
//!
//! # Examples
//!
//! ```
//! use stemflow::core::types::StemId;
//!
//! let stem = StemId::new("button__icon_size_large").unwrap();
//! assert_eq!(stem.as_str(), "button__icon_size_large");
//!
//! assert!(StemId::new("").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("stem identifier cannot be empty")]
    EmptyStem,
}

/// An opaque key uniquely identifying one artifact's position in the naming
/// hierarchy.
///
/// Equality is exact string equality. `StemId` is ordered so that sets and
/// maps keyed by it iterate deterministically.
///
/// # Example
///
/// ```
/// use stemflow::core::types::StemId;
///
/// let a = StemId::new("block").unwrap();
/// let b = StemId::new("block_mod_val").unwrap();
/// assert_ne!(a, b);
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StemId(String);

impl StemId {
    /// Create a new stem identifier.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::EmptyStem` if the string is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::EmptyStem);
        }
        Ok(Self(id))
    }

    /// Construct from a string already known to be non-empty.
    ///
    /// Used by [`crate::core::naming`] when re-serializing a record whose
    /// base is guaranteed non-empty by parsing.
    pub(crate) fn from_non_empty(id: String) -> Self {
        debug_assert!(!id.is_empty());
        Self(id)
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StemId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<StemId> for String {
    fn from(id: StemId) -> Self {
        id.0
    }
}

impl AsRef<str> for StemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
