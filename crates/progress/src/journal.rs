//! Recording and clearing achievements.
//!
//! Every write goes through a milestone's storage key, so aliased entries
//! always land on the same record.

use chrono::NaiveDate;
use tinysteps_core::{AchievementData, Achievements, BabyProfile, Milestone};
use tracing::debug;
use crate::{ProgressError, Result};

/// Record `milestone` as achieved on `date`.
///
/// Requires a profile with a valid birth date and rejects dates before it.
/// Without a new photo, any photo already attached is kept.
pub fn log_achievement(
    profile: &BabyProfile,
    achievements: &Achievements,
    milestone: &Milestone,
    date: NaiveDate,
    photo: Option<String>,
) -> Result<Achievements> {
    let birth = profile.birth_date().ok_or(ProgressError::MissingBirthDate)?;
    if date < birth {
        return Err(ProgressError::DateBeforeBirth { date, birth });
    }

    let data = AchievementData {
        photo,
        ..AchievementData::on(date)
    };

    debug!(milestone = %milestone.id, key = %milestone.storage_key(), %date, "logging achievement");
    Ok(achievements.record(milestone.storage_key().clone(), data))
}

/// Remove the achievement for `milestone`, if recorded.
pub fn clear_achievement(achievements: &Achievements, milestone: &Milestone) -> Achievements {
    debug!(milestone = %milestone.id, key = %milestone.storage_key(), "clearing achievement");
    achievements.remove(milestone.storage_key())
}

/// Set or clear the photo of an achieved milestone.
pub fn attach_photo(
    achievements: &Achievements,
    milestone: &Milestone,
    photo: Option<String>,
) -> Result<Achievements> {
    let key = milestone.storage_key();
    if !achievements.contains(key) {
        return Err(ProgressError::NotAchieved(milestone.id.clone()));
    }
    Ok(achievements.set_photo(key, photo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinysteps_core::age::parse_date;
    use tinysteps_core::{Domain, MilestoneId, RedFlag};

    fn pointing() -> Milestone {
        Milestone {
            id: MilestoneId::new("SE_10-12_1"),
            domain: Domain::SocialEmotional,
            age_group: "10-12".to_string(),
            description: "Points to show".to_string(),
            question: "Points to show you things".to_string(),
            typical_age: 12,
            red_flag: RedFlag::AtLeast(18),
            depends_on: Vec::new(),
            canonical_id: Some(MilestoneId::new("FM_7-9_4")),
        }
    }

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_logs_under_storage_key() {
        let profile = BabyProfile::new("Ada", "2024-01-15");
        let logged = log_achievement(&profile, &Achievements::new(), &pointing(), date("2024-12-01"), None).unwrap();

        assert!(logged.contains(&MilestoneId::new("FM_7-9_4")));
        assert!(!logged.contains(&MilestoneId::new("SE_10-12_1")));
        assert_eq!(logged.get(&MilestoneId::new("FM_7-9_4")).unwrap().date, "2024-12-01");
    }

    #[test]
    fn test_rejects_dates_before_birth() {
        let profile = BabyProfile::new("Ada", "2024-01-15");
        let err = log_achievement(&profile, &Achievements::new(), &pointing(), date("2024-01-14"), None)
            .unwrap_err();
        assert!(matches!(err, ProgressError::DateBeforeBirth { .. }));

        // Birth day itself is fine
        assert!(log_achievement(&profile, &Achievements::new(), &pointing(), date("2024-01-15"), None).is_ok());
    }

    #[test]
    fn test_requires_birth_date() {
        let profile = BabyProfile::new("Ada", "");
        let err = log_achievement(&profile, &Achievements::new(), &pointing(), date("2024-03-01"), None)
            .unwrap_err();
        assert!(matches!(err, ProgressError::MissingBirthDate));
    }

    #[test]
    fn test_photo_lifecycle() {
        let profile = BabyProfile::new("Ada", "2024-01-15");
        let milestone = pointing();
        let key = MilestoneId::new("FM_7-9_4");

        let err = attach_photo(&Achievements::new(), &milestone, Some("p".into())).unwrap_err();
        assert!(matches!(err, ProgressError::NotAchieved(_)));

        let logged = log_achievement(&profile, &Achievements::new(), &milestone, date("2024-12-01"), Some("p".into())).unwrap();
        let redated = log_achievement(&profile, &logged, &milestone, date("2024-12-03"), None).unwrap();
        assert_eq!(redated.get(&key).unwrap().photo.as_deref(), Some("p"));

        let cleared = attach_photo(&redated, &milestone, None).unwrap();
        assert!(cleared.get(&key).unwrap().photo.is_none());

        assert!(clear_achievement(&cleared, &milestone).is_empty());
    }
}
