//! Durable storage for the draft record.
//!
//! The draft is one JSON document under a fixed file name in the callpad
//! state directory. Storage is a trait so sessions can be tested against an
//! in-memory backend.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

/// File name of the single draft record within the state directory.
const DRAFT_FILE_NAME: &str = "draft.json";

/// Resolve the callpad state directory.
/// Priority: `CALLPAD_STATE_DIR` env > `~/.callpad/`
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CALLPAD_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".callpad");
    }
    PathBuf::from(".callpad")
}

/// Backend holding the serialized draft record.
#[async_trait]
pub trait DraftStorage: Send + Sync {
    /// Read the record; `None` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<String>>;

    /// Overwrite the record.
    async fn save(&self, record: &str) -> Result<()>;
}

/// File-backed storage, written atomically (temp file, then rename).
pub struct FileDraftStorage {
    path: PathBuf,
}

impl FileDraftStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The standard record location under [`state_dir`].
    pub fn default_path() -> PathBuf {
        state_dir().join(DRAFT_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileDraftStorage {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[async_trait]
impl DraftStorage for FileDraftStorage {
    async fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No draft record on disk");
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read draft record: {}", self.path.display()))?;
        Ok(Some(raw))
    }

    async fn save(&self, record: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create state directory: {}", parent.display()))?;
        }

        // Write to temp file, then rename for atomicity.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, record.as_bytes())
            .await
            .with_context(|| format!("Failed to write temp draft: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to rename temp draft to: {}", self.path.display()))?;

        debug!(path = %self.path.display(), "Wrote draft record");
        Ok(())
    }
}

/// In-memory storage for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryDraftStorage {
    record: std::sync::Mutex<Option<String>>,
}

impl MemoryDraftStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the stored record.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: std::sync::Mutex::new(Some(record.into())),
        }
    }
}

#[async_trait]
impl DraftStorage for MemoryDraftStorage {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.record.lock().expect("draft lock poisoned").clone())
    }

    async fn save(&self, record: &str) -> Result<()> {
        *self.record.lock().expect("draft lock poisoned") = Some(record.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileDraftStorage::new(dir.path().join("draft.json"));

        assert!(storage.load().await.unwrap().is_none());

        storage.save(r#"{"model":"gpt-4o"}"#).await.unwrap();
        assert_eq!(
            storage.load().await.unwrap().as_deref(),
            Some(r#"{"model":"gpt-4o"}"#)
        );

        // A second save replaces the record in place.
        storage.save(r#"{"model":"gpt-4o-mini"}"#).await.unwrap();
        assert_eq!(
            storage.load().await.unwrap().as_deref(),
            Some(r#"{"model":"gpt-4o-mini"}"#)
        );
    }

    #[tokio::test]
    async fn test_file_storage_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileDraftStorage::new(dir.path().join("deep/nested/draft.json"));
        storage.save("{}").await.unwrap();
        assert_eq!(storage.load().await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemoryDraftStorage::new();
        assert!(storage.load().await.unwrap().is_none());
        storage.save("record").await.unwrap();
        assert_eq!(storage.load().await.unwrap().as_deref(), Some("record"));
    }
}
