//! Local key/value store
//!
//! This module provides the durable string store the session layer mirrors
//! the current session into. It stands in for browser local storage and
//! supports:
//! - In-memory store (moka) - default, lives as long as the process
//! - File store - a single JSON object on disk, survives restarts
//!
//! The driver is selected based on configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use qrdash::storage::{create_store, LocalStore};
//! use qrdash::config::StorageConfig;
//!
//! let store = create_store(&StorageConfig::default()).await?;
//! store.set_item("auth_user", "{}").await?;
//! ```

pub mod file;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{StorageConfig, StorageDriver};

/// Local store trait
///
/// String keys to string values, mirroring the `localStorage` API.
/// Callers serialize structured values themselves.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Get the value stored under `key`
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; a missing key is not an error
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// Remove every entry
    async fn clear(&self) -> Result<()>;
}

pub use file::FileStore;
pub use memory::MemoryStore;

/// Create a local store based on configuration
///
/// - `StorageDriver::Memory` - an empty in-process store
/// - `StorageDriver::File` - opens (or creates on first write) the file at `config.path`
pub async fn create_store(config: &StorageConfig) -> Result<Arc<dyn LocalStore>> {
    match config.driver {
        StorageDriver::Memory => {
            tracing::info!("Using in-memory local store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageDriver::File => {
            tracing::info!("Using file local store at {}", config.path.display());
            let store = FileStore::open(&config.path).await?;
            Ok(Arc::new(store))
        }
    }
}
