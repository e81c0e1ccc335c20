//! Milestone catalog loading and validation for tinysteps.
//!
//! The catalog is read once at startup and never changes afterwards. Loading
//! fails fast on duplicate ids and dependency cycles; dangling dependency
//! references are either rejected or kept fail-closed, per [`DanglingPolicy`].

#![warn(missing_docs)]

pub mod catalog;
pub mod validate;

pub use catalog::Catalog;
pub use validate::{DanglingPolicy, DanglingReference};

use tinysteps_core::MilestoneId;

/// Error type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A bundled table failed to parse
    #[error("bundled table {name} is malformed: {source}")]
    Table {
        /// Table file name
        name: String,
        /// Parse error
        source: serde_json::Error,
    },

    /// Two entries share an id
    #[error("duplicate milestone id: {0}")]
    DuplicateId(MilestoneId),

    /// A dependency names no catalog entry
    #[error("milestone {milestone} depends on unknown milestone {missing}")]
    DanglingDependency {
        /// Milestone declaring the dependency
        milestone: MilestoneId,
        /// The unknown id
        missing: MilestoneId,
    },

    /// The dependency graph contains a cycle
    #[error("dependency cycle: {}", format_path(.0))]
    Cycle(Vec<MilestoneId>),
}

fn format_path(path: &[MilestoneId]) -> String {
    path.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
