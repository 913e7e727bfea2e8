//! Cached copy of the curated model catalog.

use crate::dir::ConfigDir;
use crate::error::StoreError;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Local cache of the remote catalog, persisted verbatim.
///
/// Each fetch fully replaces the file; prior content is discarded, never
/// merged.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    path: PathBuf,
}

impl CatalogCache {
    /// Opens the cache inside `dir`.
    #[must_use]
    pub fn new(dir: &ConfigDir) -> Self {
        Self {
            path: dir.catalog_path(),
        }
    }

    /// Loads the cached descriptors, or `None` if no fetch has happened yet.
    pub fn load(&self) -> Result<Option<Vec<Value>>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Overwrites the cache with `descriptors`, pretty-printed.
    pub fn save(&self, descriptors: &[Value]) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(descriptors)?;
        fs::write(&self.path, text)?;
        tracing::debug!(count = descriptors.len(), path = %self.path.display(), "catalog cache replaced");
        Ok(())
    }
}
