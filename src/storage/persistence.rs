//! Persistence Adapter
//!
//! Loads and saves the whole file system as one serialized value under a
//! single storage key.

use std::sync::Arc;

use tracing::{debug, warn};

use super::types::{Storage, StorageError};
use crate::fs::VirtualFs;

/// Key the file system is stored under.
pub const STORAGE_KEY: &str = "terminalFS";

#[derive(Clone)]
pub struct Persistence {
    storage: Arc<dyn Storage>,
    key: String,
}

impl Persistence {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored file system, or `None` if nothing usable is stored.
    pub async fn load(&self) -> Option<VirtualFs> {
        let raw = match self.storage.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read stored file system");
                return None;
            }
        };
        match VirtualFs::from_json(&raw) {
            Ok(fs) => {
                debug!(key = %self.key, entries = fs.len(), "loaded file system");
                Some(fs)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored file system is malformed, ignoring it");
                None
            }
        }
    }

    pub async fn save(&self, fs: &VirtualFs) -> Result<(), StorageError> {
        let json = fs.to_json()?;
        self.storage.set(&self.key, json).await
    }
}
