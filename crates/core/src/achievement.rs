//! Achievement snapshots.
//!
//! [`Achievements`] is an immutable value: every command returns a new
//! snapshot and leaves the receiver untouched, so derived views can be
//! recomputed from any snapshot without coordination.

use std::collections::BTreeMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::age::{parse_date, DATE_FORMAT};
use crate::id::MilestoneId;

/// When a milestone was achieved, plus an optional photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementData {
    /// Date achieved, `YYYY-MM-DD`
    pub date: String,

    /// Opaque photo payload (e.g. a data URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl AchievementData {
    /// Achievement on a date, without photo.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            photo: None,
        }
    }

    /// Parsed achievement date, `None` if malformed.
    pub fn achieved_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Recorded achievements keyed by storage key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Achievements {
    entries: BTreeMap<MilestoneId, AchievementData>,
}

impl Achievements {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an achievement under `key`.
    ///
    /// When `data` carries no photo, a photo already stored for the key is
    /// kept, so re-dating an achievement does not lose its picture.
    pub fn record(&self, key: MilestoneId, data: AchievementData) -> Self {
        let mut entries = self.entries.clone();
        let photo = data
            .photo
            .or_else(|| entries.get(&key).and_then(|existing| existing.photo.clone()));
        entries.insert(key, AchievementData { date: data.date, photo });
        Self { entries }
    }

    /// Remove the achievement under `key`, if any.
    pub fn remove(&self, key: &MilestoneId) -> Self {
        let mut entries = self.entries.clone();
        entries.remove(key);
        Self { entries }
    }

    /// Set or clear the photo of an existing achievement. Unknown keys are
    /// left alone.
    pub fn set_photo(&self, key: &MilestoneId, photo: Option<String>) -> Self {
        let mut entries = self.entries.clone();
        if let Some(data) = entries.get_mut(key) {
            data.photo = photo;
        }
        Self { entries }
    }

    /// Look up by storage key.
    pub fn get(&self, key: &MilestoneId) -> Option<&AchievementData> {
        self.entries.get(key)
    }

    /// Whether `key` has an achievement.
    pub fn contains(&self, key: &MilestoneId) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of recorded achievements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No achievements recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&MilestoneId, &AchievementData)> {
        self.entries.iter()
    }
}

impl FromIterator<(MilestoneId, AchievementData)> for Achievements {
    fn from_iter<I: IntoIterator<Item = (MilestoneId, AchievementData)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
