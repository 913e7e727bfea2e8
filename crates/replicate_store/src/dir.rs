//! Configuration directory handling.

use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// Base directory holding every local state file.
///
/// Threaded explicitly into each store constructor rather than discovered
/// from global state. Creation is on-demand and idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    base: PathBuf,
}

impl ConfigDir {
    /// Wraps a base path. The directory is not created until
    /// [`ensure`](Self::ensure) is called.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Creates the directory (and parents) if it does not already exist.
    pub fn ensure(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base)?;
        Ok(())
    }

    /// The base path itself.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path of the cached catalog file.
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.base.join("fetch-models.json")
    }

    /// Path of the user-managed registry file.
    #[must_use]
    pub fn models_path(&self) -> PathBuf {
        self.base.join("models.json")
    }

    /// Path of the stored API keys file.
    #[must_use]
    pub fn keys_path(&self) -> PathBuf {
        self.base.join("keys.json")
    }

    /// Path of the prediction record table.
    #[must_use]
    pub fn predictions_path(&self) -> PathBuf {
        self.base.join("predictions.json")
    }
}
