//! Identifier types for portfolio entities.

use std::fmt;

/// Unique identifier for a position.
///
/// # Examples
///
/// ```
/// use pricer_risk::portfolio::PositionId;
///
/// let id = PositionId::new("POS001");
/// assert_eq!(id.as_str(), "POS001");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionId(String);

impl PositionId {
    /// Creates a new position ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PositionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PositionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
