//! Baby profile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::age::parse_date;

/// The child being tracked.
///
/// Fields are kept exactly as entered; the birth date is parsed on demand so
/// a malformed value degrades age-dependent views instead of failing a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BabyProfile {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Birth date, `YYYY-MM-DD`
    #[serde(default)]
    pub dob: String,
}

impl BabyProfile {
    /// Create a profile.
    pub fn new(name: impl Into<String>, dob: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dob: dob.into(),
        }
    }

    /// Parsed birth date, `None` if missing or malformed.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        parse_date(&self.dob)
    }

    /// Both name and a valid birth date are present.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.birth_date().is_some()
    }
}
