//! Questionnaire session - one milestone at a time, in catalog order.
//!
//! The session owns which milestone is on screen. Answering a question
//! returns a new achievement snapshot and moves on explicitly through
//! [`QuestionnaireSession::advance_to_next`].

use chrono::NaiveDate;
use tinysteps_catalog::Catalog;
use tinysteps_core::{Achievements, BabyProfile, Milestone, MilestoneId};
use crate::journal::{clear_achievement, log_achievement};
use crate::{ProgressError, Result};

/// Walks the catalog one milestone at a time.
#[derive(Debug, Clone)]
pub struct QuestionnaireSession<'a> {
    catalog: &'a Catalog,
    current: Option<usize>,
}

impl<'a> QuestionnaireSession<'a> {
    /// Create a session with nothing displayed.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            current: None,
        }
    }

    /// Display the first milestone of the catalog.
    pub fn start(&mut self) -> Option<&'a Milestone> {
        self.current = if self.catalog.is_empty() { None } else { Some(0) };
        self.current()
    }

    /// Display a specific milestone.
    pub fn show(&mut self, id: &MilestoneId) -> Result<&'a Milestone> {
        let index = self
            .catalog
            .position(id)
            .ok_or_else(|| ProgressError::UnknownMilestone(id.clone()))?;
        self.current = Some(index);
        Ok(&self.catalog.milestones()[index])
    }

    /// The milestone currently displayed.
    pub fn current(&self) -> Option<&'a Milestone> {
        self.current.map(|i| &self.catalog.milestones()[i])
    }

    /// 1-based position and catalog size, e.g. `(3, 94)`.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current.map(|i| (i + 1, self.catalog.len()))
    }

    /// No milestone displayed (not started, or past the last one).
    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    /// Move to the next milestone in catalog order. Returns `None` and
    /// finishes the session after the last one.
    pub fn advance_to_next(&mut self) -> Option<&'a Milestone> {
        self.current = match self.current {
            Some(i) if i + 1 < self.catalog.len() => Some(i + 1),
            _ => None,
        };
        self.current()
    }

    /// "Yes": record the current milestone on `date`, then advance.
    ///
    /// On error the session stays on the current milestone.
    pub fn answer_yes(
        &mut self,
        profile: &BabyProfile,
        achievements: &Achievements,
        date: NaiveDate,
    ) -> Result<Achievements> {
        let milestone = self.current().ok_or(ProgressError::SessionFinished)?;
        let updated = log_achievement(profile, achievements, milestone, date, None)?;
        self.advance_to_next();
        Ok(updated)
    }

    /// "No": clear any existing record for the current milestone, then
    /// advance.
    pub fn answer_no(&mut self, achievements: &Achievements) -> Result<Achievements> {
        let milestone = self.current().ok_or(ProgressError::SessionFinished)?;
        let updated = clear_achievement(achievements, milestone);
        self.advance_to_next();
        Ok(updated)
    }
}
