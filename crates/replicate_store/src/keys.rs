//! Locally stored named API keys.

use crate::dir::ConfigDir;
use crate::error::StoreError;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Read-only view of `keys.json`: a flat map of key name to secret.
///
/// The file is shared with the host tool; this crate only ever reads it.
#[derive(Debug, Clone)]
pub struct StoredKeys {
    path: PathBuf,
}

impl StoredKeys {
    /// Opens the keys file inside `dir`.
    #[must_use]
    pub fn new(dir: &ConfigDir) -> Self {
        Self {
            path: dir.keys_path(),
        }
    }

    /// Loads all stored keys; a missing file reads as no keys.
    pub fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        let raw: HashMap<String, Value> = serde_json::from_str(&text)?;
        // Non-string values (e.g. host-tool metadata entries) are skipped.
        Ok(raw
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::String(secret) => Some((name, secret)),
                _ => None,
            })
            .collect())
    }

    /// Looks up one named key.
    pub fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(name))
    }
}
