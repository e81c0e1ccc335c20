//! Per-domain progress overview.

use chrono::{Duration, NaiveDate};
use tinysteps_catalog::Catalog;
use tinysteps_core::{Achievements, Domain, Milestone};
use crate::resolver::{is_achieved, DependencyResolver};

/// How far ahead of the current age upcoming milestones are looked for.
const UPCOMING_HORIZON_MONTHS: u32 = 6;

/// Upcoming milestones listed per domain.
const UPCOMING_LIMIT: usize = 2;

/// Achievements at most this many days old count as recent.
const RECENT_DAYS: i64 = 30;

/// Achieved vs. total milestones in one domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainProgress {
    /// Domain
    pub domain: Domain,
    /// Achieved milestones
    pub achieved: usize,
    /// Milestones in the catalog for this domain
    pub total: usize,
    /// Percentage complete (0-100)
    pub percentage: f32,
}

/// Progress, upcoming work and recent activity for one domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainOverview<'a> {
    /// Achieved vs. total
    pub progress: DomainProgress,
    /// Next unlocked, unachieved milestones by typical age
    pub upcoming: Vec<&'a Milestone>,
    /// Achievements dated within the last 30 days
    pub recent_achievements: usize,
}

/// A snapshot of progress across all domains.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot<'a> {
    /// Date the snapshot was taken for
    pub today: NaiveDate,
    /// Chronological age used for upcoming milestones
    pub chronological_age: u32,
    /// One entry per domain, in display order
    pub domains: Vec<DomainOverview<'a>>,
}

impl ProgressSnapshot<'_> {
    /// Achieved milestones summed over all domains.
    pub fn total_achieved(&self) -> usize {
        self.domains.iter().map(|d| d.progress.achieved).sum()
    }
}

/// Computes progress views over a catalog.
#[derive(Debug, Clone, Copy)]
pub struct ProgressTracker<'a> {
    catalog: &'a Catalog,
    resolver: DependencyResolver<'a>,
}

impl<'a> ProgressTracker<'a> {
    /// Create a tracker.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            resolver: DependencyResolver::new(catalog),
        }
    }

    /// Achieved vs. total for a domain.
    pub fn domain_progress(&self, achievements: &Achievements, domain: Domain) -> DomainProgress {
        let mut total = 0;
        let mut achieved = 0;
        for milestone in self.catalog.in_domain(domain) {
            total += 1;
            if is_achieved(milestone, achievements) {
                achieved += 1;
            }
        }

        let percentage = if total > 0 {
            (achieved as f32 / total as f32) * 100.0
        } else {
            0.0
        };

        DomainProgress {
            domain,
            achieved,
            total,
            percentage,
        }
    }

    /// Full overview for one domain.
    pub fn domain_overview(
        &self,
        achievements: &Achievements,
        domain: Domain,
        chronological_age: u32,
        today: NaiveDate,
    ) -> DomainOverview<'a> {
        let horizon = chronological_age + UPCOMING_HORIZON_MONTHS;
        let mut upcoming: Vec<&'a Milestone> = self
            .catalog
            .in_domain(domain)
            .filter(|m| !is_achieved(m, achievements))
            .filter(|m| m.typical_age <= horizon)
            .filter(|m| self.resolver.is_eligible(m, achievements))
            .collect();
        upcoming.sort_by_key(|m| m.typical_age);
        upcoming.truncate(UPCOMING_LIMIT);

        let cutoff = today - Duration::days(RECENT_DAYS);
        let recent_achievements = self
            .catalog
            .in_domain(domain)
            .filter_map(|m| achievements.get(m.storage_key()))
            .filter_map(|data| data.achieved_on())
            .filter(|date| *date >= cutoff)
            .count();

        DomainOverview {
            progress: self.domain_progress(achievements, domain),
            upcoming,
            recent_achievements,
        }
    }

    /// Overview of every domain.
    pub fn snapshot(
        &self,
        achievements: &Achievements,
        chronological_age: u32,
        today: NaiveDate,
    ) -> ProgressSnapshot<'a> {
        let domains = Domain::ALL
            .iter()
            .map(|&domain| self.domain_overview(achievements, domain, chronological_age, today))
            .collect();

        ProgressSnapshot {
            today,
            chronological_age,
            domains,
        }
    }
}
