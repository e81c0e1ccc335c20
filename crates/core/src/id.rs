//! Identifiers for catalog entries.

use serde::{Deserialize, Serialize};

/// Identifier of a milestone, e.g. `GM_4-6_1`.
///
/// The same type is used for storage keys: a storage key is simply the id
/// an achievement is recorded under (see [`crate::Milestone::storage_key`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestoneId(String);

impl MilestoneId {
    /// Create from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for MilestoneId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for MilestoneId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MilestoneId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::borrow::Borrow<str> for MilestoneId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
