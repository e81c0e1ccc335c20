//! What to look out for next.

use tinysteps_catalog::Catalog;
use tinysteps_core::{Achievements, Domain, Milestone};
use crate::resolver::{is_achieved, DependencyResolver};

/// Number of suggestions shown by default.
pub const DEFAULT_LIMIT: usize = 4;

/// Months before the current age still considered for suggestions.
const WINDOW_BEFORE: u32 = 1;

/// Months after the current age considered for suggestions.
const WINDOW_AFTER: u32 = 3;

/// Suggestions belonging to one domain.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionGroup<'a> {
    /// Domain
    pub domain: Domain,
    /// Suggested milestones, closest to the current age first
    pub milestones: Vec<&'a Milestone>,
}

/// Unachieved, unlocked milestones whose typical age is near the child's.
///
/// Candidates have a typical age within one month before to three months
/// after `chronological_age`. They are ranked by distance from the current
/// age, then by typical age, cut to `limit`, and grouped by domain in order
/// of first appearance.
pub fn suggest<'a>(
    catalog: &'a Catalog,
    achievements: &Achievements,
    chronological_age: u32,
    limit: usize,
) -> Vec<SuggestionGroup<'a>> {
    let resolver = DependencyResolver::new(catalog);
    let start = chronological_age.saturating_sub(WINDOW_BEFORE);
    let end = chronological_age + WINDOW_AFTER;

    let mut candidates: Vec<&'a Milestone> = catalog
        .milestones()
        .iter()
        .filter(|m| !is_achieved(m, achievements))
        .filter(|m| (start..=end).contains(&m.typical_age))
        .filter(|m| resolver.is_eligible(m, achievements))
        .collect();

    candidates.sort_by_key(|m| (m.typical_age.abs_diff(chronological_age), m.typical_age));
    candidates.truncate(limit);

    let mut groups: Vec<SuggestionGroup<'a>> = Vec::new();
    for milestone in candidates {
        match groups.iter_mut().find(|g| g.domain == milestone.domain) {
            Some(group) => group.milestones.push(milestone),
            None => groups.push(SuggestionGroup {
                domain: milestone.domain,
                milestones: vec![milestone],
            }),
        }
    }

    groups
}

/// When a milestone is expected relative to the current age.
pub fn timing_label(typical_age: u32, chronological_age: u32) -> String {
    if typical_age <= chronological_age {
        return "Available now".to_string();
    }

    match typical_age - chronological_age {
        1 | 2 => "Coming soon".to_string(),
        n => format!("In {} months", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinysteps_catalog::DanglingPolicy;
    use tinysteps_core::{AchievementData, MilestoneId, RedFlag};

    fn m(id: &str, domain: Domain, typical_age: u32, deps: &[&str], canonical: Option<&str>) -> Milestone {
        Milestone {
            id: MilestoneId::new(id),
            domain,
            age_group: "x".to_string(),
            description: id.to_string(),
            question: id.to_string(),
            typical_age,
            red_flag: RedFlag::Over(typical_age + 2),
            depends_on: deps.iter().map(|d| MilestoneId::new(*d)).collect(),
            canonical_id: canonical.map(MilestoneId::new),
        }
    }

    fn flat<'a>(groups: &'a [SuggestionGroup<'a>]) -> Vec<(Domain, Vec<&'a str>)> {
        groups
            .iter()
            .map(|g| (g.domain, g.milestones.iter().map(|m| m.id.as_str()).collect()))
            .collect()
    }

    fn achieved(key: &str) -> Achievements {
        Achievements::new().record(
            MilestoneId::new(key),
            AchievementData {
                date: "2024-02-01".to_string(),
                photo: None,
            },
        )
    }

    #[test]
    fn test_window_ranking_and_grouping() {
        let catalog = Catalog::new(
            vec![
                m("too_early", Domain::GrossMotor, 4, &[], None),
                m("gm_6", Domain::GrossMotor, 6, &[], None),
                m("fm_8", Domain::FineMotor, 8, &[], None),
                m("se_5", Domain::SocialEmotional, 5, &[], None),
                m("fm_6", Domain::FineMotor, 6, &[], None),
                m("too_late", Domain::FineMotor, 10, &[], None),
                m("gm_9", Domain::GrossMotor, 9, &[], None),
            ],
            DanglingPolicy::Reject,
        )
        .unwrap();

        let groups = suggest(&catalog, &Achievements::new(), 6, DEFAULT_LIMIT);
        assert_eq!(
            flat(&groups),
            vec![
                (Domain::GrossMotor, vec!["gm_6"]),
                (Domain::FineMotor, vec!["fm_6", "fm_8"]),
                (Domain::SocialEmotional, vec!["se_5"]),
            ]
        );

        let limited = suggest(&catalog, &Achievements::new(), 6, 2);
        assert_eq!(
            flat(&limited),
            vec![(Domain::GrossMotor, vec!["gm_6"]), (Domain::FineMotor, vec!["fm_6"])]
        );
    }

    #[test]
    fn test_achieved_and_locked_are_excluded() {
        let catalog = Catalog::new(
            vec![
                m("fm_point", Domain::FineMotor, 9, &[], None),
                m("se_point", Domain::SocialEmotional, 9, &[], Some("fm_point")),
                m("se_wave", Domain::SocialEmotional, 10, &["se_point"], None),
                m("se_clap", Domain::SocialEmotional, 10, &["ghost"], None),
            ],
            DanglingPolicy::FailClosed,
        )
        .unwrap();

        let before = suggest(&catalog, &Achievements::new(), 9, DEFAULT_LIMIT);
        assert_eq!(
            flat(&before),
            vec![
                (Domain::FineMotor, vec!["fm_point"]),
                (Domain::SocialEmotional, vec!["se_point"]),
            ]
        );

        // Achieving the shared key removes both aliased entries at once
        let after = suggest(&catalog, &achieved("fm_point"), 9, DEFAULT_LIMIT);
        assert_eq!(flat(&after), vec![(Domain::SocialEmotional, vec!["se_wave"])]);
    }

    #[test]
    fn test_newborn_window_starts_at_zero() {
        let catalog = Catalog::new(
            vec![m("a", Domain::Cognitive, 0, &[], None), m("b", Domain::Cognitive, 4, &[], None)],
            DanglingPolicy::Reject,
        )
        .unwrap();
        let groups = suggest(&catalog, &Achievements::new(), 0, DEFAULT_LIMIT);
        assert_eq!(flat(&groups), vec![(Domain::Cognitive, vec!["a"])]);
    }

    #[test]
    fn test_timing_label() {
        assert_eq!(timing_label(4, 6), "Available now");
        assert_eq!(timing_label(6, 6), "Available now");
        assert_eq!(timing_label(7, 6), "Coming soon");
        assert_eq!(timing_label(8, 6), "Coming soon");
        assert_eq!(timing_label(9, 6), "In 3 months");
    }
}
