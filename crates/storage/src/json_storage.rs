//! JSON file storage implementation.
//!
//! Keeps `profile.json` and `achievements.json` in a data directory
//! (`.tinysteps` by default in the CLI).

use std::path::{Path, PathBuf};
use tinysteps_core::{Achievements, BabyProfile};
use tokio::fs;
use tracing::debug;
use super::{Result, Storage};

const PROFILE_FILE: &str = "profile.json";
const ACHIEVEMENTS_FILE: &str = "achievements.json";

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn profile_path(&self) -> PathBuf {
        self.root.join(PROFILE_FILE)
    }

    fn achievements_path(&self) -> PathBuf {
        self.root.join(ACHIEVEMENTS_FILE)
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn load_profile(&self) -> Result<Option<BabyProfile>> {
        read_json(&self.profile_path()).await
    }

    async fn save_profile(&mut self, profile: &BabyProfile) -> Result<()> {
        write_json(&self.profile_path(), profile).await
    }

    async fn load_achievements(&self) -> Result<Achievements> {
        Ok(read_json(&self.achievements_path()).await?.unwrap_or_default())
    }

    async fn save_achievements(&mut self, achievements: &Achievements) -> Result<()> {
        write_json(&self.achievements_path(), achievements).await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    debug!(path = %path.display(), bytes = json.len(), "wrote state file");
    Ok(())
}
