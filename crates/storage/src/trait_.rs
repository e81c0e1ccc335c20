//! Storage trait abstraction.

use async_trait::async_trait;
use tinysteps_core::{Achievements, BabyProfile};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence for the caregiver-entered state.
///
/// The profile and the achievement map are stored as two independent blobs,
/// each the direct serialized form of its type, and written back whole after
/// every change.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the profile; `None` if none was saved yet.
    async fn load_profile(&self) -> Result<Option<BabyProfile>>;

    /// Save the profile (create or replace).
    async fn save_profile(&mut self, profile: &BabyProfile) -> Result<()>;

    /// Load the achievement snapshot; empty if none was saved yet.
    async fn load_achievements(&self) -> Result<Achievements>;

    /// Save the achievement snapshot (replace).
    async fn save_achievements(&mut self, achievements: &Achievements) -> Result<()>;
}
