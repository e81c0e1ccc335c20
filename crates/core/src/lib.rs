//! tinysteps core data models.
//!
//! This crate defines the milestone model, achievement snapshots, the baby
//! profile and the calendar arithmetic every derived view is built on.

#![warn(missing_docs)]

// Identities
mod id;
mod domain;

// Catalog entries
mod milestone;

// Caregiver-entered state
mod achievement;
mod profile;

// Calendar arithmetic
pub mod age;

// Re-exports
pub use id::MilestoneId;
pub use domain::{Domain, ParseDomainError};
pub use milestone::{Milestone, RedFlag};
pub use achievement::{AchievementData, Achievements};
pub use profile::BabyProfile;
pub use age::{months_between, chronological_age};
