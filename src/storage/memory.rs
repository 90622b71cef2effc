//! In-memory local store using moka
//!
//! Entries never expire and are never evicted; the store only forgets
//! what is explicitly removed. Sharing one `MemoryStore` between two
//! session services is how tests model a page reload.

use super::LocalStore;
use anyhow::Result;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;

/// In-memory local store
#[derive(Clone)]
pub struct MemoryStore {
    entries: Cache<String, Arc<String>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entry_count", &self.entries.entry_count())
            .finish()
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        // No max_capacity and no time_to_live: nothing is dropped behind our back.
        let entries = Cache::builder().build();
        Self { entries }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .get(key)
            .await
            .map(|value| value.as_ref().clone()))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .insert(key.to_string(), Arc::new(value.to_string()))
            .await;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.entries.invalidate(key).await;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
        Ok(())
    }
}
