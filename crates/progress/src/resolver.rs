//! Dependency resolution for milestones.

use tinysteps_catalog::Catalog;
use tinysteps_core::{Achievements, Domain, Milestone, MilestoneId};

/// Result of checking a milestone's prerequisites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// All dependencies achieved
    Ready,
    /// Waiting on these dependency ids
    Blocked(Vec<MilestoneId>),
}

/// An eligible milestone annotated for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneStatus<'a> {
    /// The milestone
    pub milestone: &'a Milestone,
    /// Achievement recorded under its storage key
    pub achieved: bool,
    /// Red-flag predicate at the current age
    pub red_flag: bool,
    /// Red flag raised and not achieved
    pub overdue: bool,
}

/// Whether the milestone's storage key has an achievement.
pub fn is_achieved(milestone: &Milestone, achievements: &Achievements) -> bool {
    achievements.contains(milestone.storage_key())
}

/// Red-flag check at the child's current chronological age.
pub fn is_overdue(milestone: &Milestone, chronological_age: u32) -> bool {
    milestone.is_red_flag(chronological_age)
}

/// Resolves milestone dependencies against an achievement snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> DependencyResolver<'a> {
    /// Create a resolver over a catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Check a milestone's dependencies.
    pub fn check(&self, milestone: &Milestone, achievements: &Achievements) -> Eligibility {
        if milestone.is_root() {
            return Eligibility::Ready;
        }

        let blocked: Vec<MilestoneId> = milestone
            .depends_on
            .iter()
            .filter(|dep_id| !self.dependency_met(dep_id, achievements))
            .cloned()
            .collect();

        if blocked.is_empty() {
            Eligibility::Ready
        } else {
            Eligibility::Blocked(blocked)
        }
    }

    /// All dependencies of `milestone` are achieved.
    pub fn is_eligible(&self, milestone: &Milestone, achievements: &Achievements) -> bool {
        matches!(self.check(milestone, achievements), Eligibility::Ready)
    }

    /// A dependency is met when the referenced milestone exists and its
    /// storage key has an achievement. Unknown ids are never met.
    fn dependency_met(&self, dep_id: &MilestoneId, achievements: &Achievements) -> bool {
        let Some(dependency) = self.catalog.get(dep_id) else {
            return false;
        };
        is_achieved(dependency, achievements)
    }

    /// Eligible milestones of a domain, by typical age then catalog order.
    pub fn eligible_for_domain(
        &self,
        achievements: &Achievements,
        domain: Domain,
    ) -> Vec<&'a Milestone> {
        let mut eligible: Vec<&'a Milestone> = self
            .catalog
            .in_domain(domain)
            .filter(|m| self.is_eligible(m, achievements))
            .collect();

        // Stable, so equal ages keep declaration order
        eligible.sort_by_key(|m| m.typical_age);
        eligible
    }

    /// [`Self::eligible_for_domain`] with achieved and red-flag markers.
    pub fn domain_statuses(
        &self,
        achievements: &Achievements,
        domain: Domain,
        chronological_age: u32,
    ) -> Vec<MilestoneStatus<'a>> {
        self.eligible_for_domain(achievements, domain)
            .into_iter()
            .map(|milestone| {
                let achieved = is_achieved(milestone, achievements);
                let red_flag = is_overdue(milestone, chronological_age);
                MilestoneStatus {
                    milestone,
                    achieved,
                    red_flag,
                    overdue: red_flag && !achieved,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tinysteps_catalog::DanglingPolicy;
    use tinysteps_core::{AchievementData, RedFlag};

    fn m(id: &str, domain: Domain, typical_age: u32, deps: &[&str], canonical: Option<&str>) -> Milestone {
        Milestone {
            id: MilestoneId::new(id),
            domain,
            age_group: "0-3".to_string(),
            description: id.to_string(),
            question: id.to_string(),
            typical_age,
            red_flag: RedFlag::AtLeast(typical_age + 3),
            depends_on: deps.iter().map(|d| MilestoneId::new(*d)).collect(),
            canonical_id: canonical.map(MilestoneId::new),
        }
    }

    fn achieved(keys: &[&str]) -> Achievements {
        keys.iter()
            .map(|k| {
                (
                    MilestoneId::new(*k),
                    AchievementData {
                        date: "2024-03-01".to_string(),
                        photo: None,
                    },
                )
            })
            .collect()
    }

    fn ids(milestones: &[&Milestone]) -> Vec<String> {
        milestones.iter().map(|m| m.id.to_string()).collect()
    }

    #[test]
    fn test_root_milestones_are_ready() {
        let catalog = Catalog::new(vec![m("A", Domain::Cognitive, 2, &[], None)], DanglingPolicy::Reject).unwrap();
        let resolver = DependencyResolver::new(&catalog);
        let a = catalog.get(&MilestoneId::new("A")).unwrap();
        assert_eq!(resolver.check(a, &Achievements::new()), Eligibility::Ready);
    }

    #[test]
    fn test_dependency_resolves_through_canonical_key() {
        let catalog = Catalog::new(
            vec![
                m("X", Domain::SocialEmotional, 9, &[], Some("K")),
                m("Y", Domain::SocialEmotional, 12, &["X"], None),
            ],
            DanglingPolicy::Reject,
        )
        .unwrap();
        let resolver = DependencyResolver::new(&catalog);
        let y = catalog.get(&MilestoneId::new("Y")).unwrap();

        assert_eq!(
            resolver.check(y, &Achievements::new()),
            Eligibility::Blocked(vec![MilestoneId::new("X")])
        );
        // The bare id is not the storage key
        assert!(!resolver.is_eligible(y, &achieved(&["X"])));
        assert!(resolver.is_eligible(y, &achieved(&["K"])));
    }

    #[test]
    fn test_dangling_dependency_is_never_met() {
        let catalog = Catalog::new(
            vec![
                m("A", Domain::GrossMotor, 2, &[], None),
                m("B", Domain::GrossMotor, 4, &["A", "GHOST"], None),
            ],
            DanglingPolicy::FailClosed,
        )
        .unwrap();
        let resolver = DependencyResolver::new(&catalog);
        let b = catalog.get(&MilestoneId::new("B")).unwrap();

        assert!(!resolver.is_eligible(b, &achieved(&["A", "GHOST", "B"])));
        assert_eq!(
            resolver.check(b, &achieved(&["A", "GHOST"])),
            Eligibility::Blocked(vec![MilestoneId::new("GHOST")])
        );
    }

    #[test]
    fn test_eligible_for_domain_order() {
        let catalog = Catalog::new(
            vec![
                m("late", Domain::FineMotor, 9, &[], None),
                m("tie_first", Domain::FineMotor, 3, &[], None),
                m("other_domain", Domain::Cognitive, 1, &[], None),
                m("tie_second", Domain::FineMotor, 3, &[], None),
                m("early", Domain::FineMotor, 1, &[], None),
                m("locked", Domain::FineMotor, 2, &["late"], None),
            ],
            DanglingPolicy::Reject,
        )
        .unwrap();
        let resolver = DependencyResolver::new(&catalog);

        let eligible = resolver.eligible_for_domain(&Achievements::new(), Domain::FineMotor);
        assert_eq!(ids(&eligible), vec!["early", "tie_first", "tie_second", "late"]);

        let eligible = resolver.eligible_for_domain(&achieved(&["late"]), Domain::FineMotor);
        assert_eq!(ids(&eligible), vec!["early", "locked", "tie_first", "tie_second", "late"]);
    }

    #[test]
    fn test_aliased_entries_share_achievement() {
        let catalog = Catalog::new(
            vec![
                m("FM_point", Domain::FineMotor, 9, &[], Some("K")),
                m("SE_point", Domain::SocialEmotional, 12, &[], Some("K")),
                m("K", Domain::Cognitive, 9, &[], None),
            ],
            DanglingPolicy::Reject,
        )
        .unwrap();
        let achievements = achieved(&["K"]);

        for milestone in catalog.milestones() {
            assert!(is_achieved(milestone, &achievements), "{} not achieved", milestone.id);
        }
        assert!(!is_achieved(catalog.get(&MilestoneId::new("FM_point")).unwrap(), &achieved(&["FM_point"])));
    }

    #[test]
    fn test_domain_statuses_flags() {
        let catalog = Catalog::new(
            vec![
                m("A", Domain::GrossMotor, 2, &[], None),
                m("B", Domain::GrossMotor, 3, &[], None),
            ],
            DanglingPolicy::Reject,
        )
        .unwrap();
        let resolver = DependencyResolver::new(&catalog);

        // Red flags at 5 and 6 months
        let statuses = resolver.domain_statuses(&achieved(&["A"]), Domain::GrossMotor, 6);
        assert_eq!(statuses.len(), 2);
        assert!(statuses[0].achieved && statuses[0].red_flag && !statuses[0].overdue);
        assert!(!statuses[1].achieved && statuses[1].red_flag && statuses[1].overdue);

        let statuses = resolver.domain_statuses(&Achievements::new(), Domain::GrossMotor, 5);
        assert!(statuses[0].overdue);
        assert!(!statuses[1].red_flag);
    }

    #[test]
    fn test_eligibility_grows_with_achievements() {
        let catalog = Catalog::bundled(DanglingPolicy::FailClosed).unwrap();
        let resolver = DependencyResolver::new(&catalog);

        let eligible_set = |achievements: &Achievements| -> HashSet<MilestoneId> {
            Domain::ALL
                .iter()
                .flat_map(|d| resolver.eligible_for_domain(achievements, *d))
                .map(|m| m.id.clone())
                .collect()
        };

        let mut achievements = Achievements::new();
        let mut previous = eligible_set(&achievements);
        for milestone in catalog.milestones() {
            achievements = achievements.record(
                milestone.storage_key().clone(),
                AchievementData {
                    date: "2024-06-01".to_string(),
                    photo: None,
                },
            );
            let current = eligible_set(&achievements);
            assert!(previous.is_subset(&current), "eligibility shrank after {}", milestone.id);
            previous = current;
        }

        // Everything except the entries waiting on missing adaptive milestones
        assert_eq!(previous.len(), catalog.len() - 2);
    }
}
