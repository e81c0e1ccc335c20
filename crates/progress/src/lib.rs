//! Progress Tracking
//!
//! Dependency resolution, timeline derivation, suggestions and per-domain
//! overviews. Every view is a pure function of the catalog, an achievement
//! snapshot, the profile and "today".

#![warn(missing_docs)]

pub mod resolver;
pub mod timeline;
pub mod suggestions;
pub mod overview;
pub mod journal;
pub mod session;

pub use resolver::{is_achieved, is_overdue, DependencyResolver, Eligibility, MilestoneStatus};
pub use timeline::{build_timeline, timeline_for, AchievedMilestone, TimelineBucket};
pub use suggestions::{suggest, timing_label, SuggestionGroup, DEFAULT_LIMIT};
pub use overview::{DomainOverview, DomainProgress, ProgressSnapshot, ProgressTracker};
pub use journal::{attach_photo, clear_achievement, log_achievement};
pub use session::QuestionnaireSession;

use chrono::NaiveDate;
use tinysteps_core::MilestoneId;

/// Error type for progress operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors raised by achievement commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    /// The profile has no usable birth date
    #[error("baby profile has no valid birth date")]
    MissingBirthDate,

    /// Achievement dated before the birth date
    #[error("achievement date {date} is before birth date {birth}")]
    DateBeforeBirth {
        /// Rejected achievement date
        date: NaiveDate,
        /// Birth date
        birth: NaiveDate,
    },

    /// Milestone has no recorded achievement
    #[error("milestone {0} has not been achieved")]
    NotAchieved(MilestoneId),

    /// Id names no catalog entry
    #[error("unknown milestone: {0}")]
    UnknownMilestone(MilestoneId),

    /// No milestone is displayed in the questionnaire
    #[error("questionnaire has no current milestone")]
    SessionFinished,
}
