//! Star rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Stars`] value.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarsError {
    /// The rating is outside the allowed 1-5 range.
    #[error("star rating must be between 1 and 5, got {value}")]
    OutOfRange {
        /// The rejected value.
        value: u8,
    },
}

/// A star rating on a review.
///
/// ## Constraints
///
/// - Value: 1-5 inclusive
///
/// Deserialization goes through the same validation, so an out-of-range
/// rating on the wire is rejected rather than silently accepted.
///
/// ## Examples
///
/// ```
/// use hazelmarket_core::Stars;
///
/// assert!(Stars::new(5).is_ok());
/// assert!(Stars::new(0).is_err());
/// assert!(Stars::new(6).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stars(u8);

impl Stars {
    /// Minimum allowed rating.
    pub const MIN: u8 = 1;
    /// Maximum allowed rating.
    pub const MAX: u8 = 5;

    /// Construct a rating, validating the 1-5 range.
    ///
    /// # Errors
    ///
    /// Returns [`StarsError::OutOfRange`] for values outside 1-5.
    pub const fn new(value: u8) -> Result<Self, StarsError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(StarsError::OutOfRange { value })
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Stars {
    type Error = StarsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stars> for u8 {
    fn from(stars: Stars) -> Self {
        stars.0
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
