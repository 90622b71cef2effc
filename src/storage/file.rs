//! File-backed local store
//!
//! Keeps every entry in one JSON object on disk. The file is read once on
//! open and rewritten in full after each mutation, so a restarted process
//! sees exactly what the previous one left behind.
//!
//! A mutation only reaches the in-memory map once the file write has
//! succeeded; a failed write leaves both untouched. Writes go to a sibling
//! temp file that is renamed over the store, so the file is never truncated.

use super::LocalStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// File-backed local store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`
    ///
    /// A missing or empty file yields an empty store; the file is created
    /// on the first write.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse local store '{}'", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read local store '{}'", path.display()))
            }
        };

        tracing::debug!("Opened local store {} with {} entries", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(entries).context("Failed to serialize local store")?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write local store '{}'", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace local store '{}'", self.path.display()))
    }
}

#[async_trait]
impl LocalStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let next = BTreeMap::new();
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }
}
