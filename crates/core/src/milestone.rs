//! Milestone model - a single trackable developmental skill.

use serde::{Deserialize, Serialize};
use crate::domain::Domain;
use crate::id::MilestoneId;

/// A milestone from the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier within the catalog
    pub id: MilestoneId,

    /// Developmental domain
    pub domain: Domain,

    /// Display age band, e.g. `"4-6"`
    pub age_group: String,

    /// Short description
    pub description: String,

    /// Question asked to the caregiver
    pub question: String,

    /// Typical age of emergence, in months
    pub typical_age: u32,

    /// Age beyond which not having the skill is notable
    pub red_flag: RedFlag,

    /// Milestones that must be achieved first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<MilestoneId>,

    /// Shared achievement key when the same skill appears in two domains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_id: Option<MilestoneId>,
}

impl Milestone {
    /// Key the achievement for this milestone is recorded under.
    ///
    /// Every achievement lookup and write must go through this so that
    /// aliased entries share one record.
    pub fn storage_key(&self) -> &MilestoneId {
        self.canonical_id.as_ref().unwrap_or(&self.id)
    }

    /// Whether this milestone is a red flag at the given chronological age.
    pub fn is_red_flag(&self, chronological_age: u32) -> bool {
        self.red_flag.is_raised(chronological_age)
    }

    /// True when no prerequisites are declared.
    pub fn is_root(&self) -> bool {
        self.depends_on.is_empty()
    }
}

/// Red-flag threshold over chronological age in months.
///
/// Both forms are monotonic: once raised for an age, raised for every
/// later age. Entries keep the operator they were authored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlag {
    /// Raised when `age >= months`
    AtLeast(u32),
    /// Raised when `age > months`
    Over(u32),
}

impl RedFlag {
    /// Evaluate the predicate.
    pub fn is_raised(&self, age: u32) -> bool {
        match *self {
            RedFlag::AtLeast(months) => age >= months,
            RedFlag::Over(months) => age > months,
        }
    }

    /// First age (in months) at which the flag is raised.
    pub fn first_raised_at(&self) -> u32 {
        match *self {
            RedFlag::AtLeast(months) => months,
            RedFlag::Over(months) => months.saturating_add(1),
        }
    }
}
