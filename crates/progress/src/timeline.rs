//! Month-bucketed timeline of achieved milestones.

use std::collections::BTreeMap;
use chrono::NaiveDate;
use tinysteps_catalog::Catalog;
use tinysteps_core::{months_between, Achievements, BabyProfile, Milestone, MilestoneId};
use tracing::debug;

/// An achievement resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievedMilestone<'a> {
    /// Catalog entry the achievement belongs to
    pub milestone: &'a Milestone,
    /// Key the achievement is stored under
    pub key: &'a MilestoneId,
    /// Date achieved
    pub achieved_on: NaiveDate,
    /// Whole months of age on that date
    pub age_in_months: u32,
    /// Attached photo, if any
    pub photo: Option<&'a str>,
}

/// All achievements made during one month of age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineBucket<'a> {
    /// Age in whole months
    pub month: u32,
    /// Achievements, earliest first
    pub entries: Vec<AchievedMilestone<'a>>,
}

/// Group achievements by age-in-months at the time they happened.
///
/// Keys that match no catalog entry and entries with a malformed date are
/// skipped. Buckets are ascending by month and entries ascending by date.
/// An absent birth date gives an empty timeline.
pub fn build_timeline<'a>(
    birth: Option<NaiveDate>,
    achievements: &'a Achievements,
    catalog: &'a Catalog,
) -> Vec<TimelineBucket<'a>> {
    let Some(birth) = birth else {
        return Vec::new();
    };

    let mut resolved: Vec<AchievedMilestone<'a>> = achievements
        .iter()
        .filter_map(|(key, data)| {
            let Some(milestone) = catalog.by_storage_key(key) else {
                debug!(key = %key, "dropping achievement with no catalog entry");
                return None;
            };
            let Some(achieved_on) = data.achieved_on() else {
                debug!(key = %key, date = %data.date, "dropping achievement with malformed date");
                return None;
            };

            Some(AchievedMilestone {
                milestone,
                key,
                achieved_on,
                age_in_months: months_between(birth, achieved_on),
                photo: data.photo.as_deref(),
            })
        })
        .collect();

    // Stable, so same-day entries keep key order
    resolved.sort_by_key(|entry| entry.achieved_on);

    let mut buckets: BTreeMap<u32, Vec<AchievedMilestone<'a>>> = BTreeMap::new();
    for entry in resolved {
        buckets.entry(entry.age_in_months).or_default().push(entry);
    }

    buckets
        .into_iter()
        .map(|(month, entries)| TimelineBucket { month, entries })
        .collect()
}

/// [`build_timeline`] using the profile's birth date.
pub fn timeline_for<'a>(
    profile: &BabyProfile,
    achievements: &'a Achievements,
    catalog: &'a Catalog,
) -> Vec<TimelineBucket<'a>> {
    build_timeline(profile.birth_date(), achievements, catalog)
}
