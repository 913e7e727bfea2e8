//! User-managed registry of explicitly added models.

use crate::dir::ConfigDir;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// One explicitly added model entry in `models.json`.
///
/// Identity key is `model` (the `"owner/name"` string); adding an entry with
/// an existing `model` value replaces the prior entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// `"owner/name"` identifier on Replicate.
    pub model: String,
    /// Flattened identifier, `"owner-name"`.
    pub model_id: String,
    /// Pinned version id.
    pub version: String,
    /// Aliases to register alongside the computed model id.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Whether the model expects the turn-based chat prompt format.
    /// Serialized only when set, matching the hand-editable file format.
    #[serde(default, skip_serializing_if = "is_false")]
    pub chat: bool,
}

impl RegistryEntry {
    /// Builds an entry for `model` (`"owner/name"`), deriving `model_id`.
    pub fn new(model: impl Into<String>, version: impl Into<String>) -> Self {
        let model = model.into();
        let model_id = model.replace('/', "-");
        Self {
            model,
            model_id,
            version: version.into(),
            aliases: Vec::new(),
            chat: false,
        }
    }
}

/// The `models.json` file: a human-editable JSON array of entries.
#[derive(Debug, Clone)]
pub struct ModelsFile {
    path: PathBuf,
}

impl ModelsFile {
    /// Opens the registry file inside `dir`.
    #[must_use]
    pub fn new(dir: &ConfigDir) -> Self {
        Self {
            path: dir.models_path(),
        }
    }

    /// Path of the underlying file, for handing to an editor.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every entry; a missing file reads as an empty list.
    ///
    /// Content is not validated beyond JSON deserialization — malformed
    /// entries become a registration-time failure, not a load-time one.
    pub fn load(&self) -> Result<Vec<RegistryEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Persists the full entry list.
    pub fn save(&self, entries: &[RegistryEntry]) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Adds `entry`, replacing any existing entry with the same `model` key.
    ///
    /// Filter-then-append: entries for other models are preserved, the
    /// matching one is dropped, and the new entry lands at the end.
    pub fn upsert(&self, entry: RegistryEntry) -> Result<(), StoreError> {
        let mut entries: Vec<RegistryEntry> = self
            .load()?
            .into_iter()
            .filter(|existing| existing.model != entry.model)
            .collect();
        entries.push(entry);
        self.save(&entries)
    }

    /// Initializes the file to an empty list if it does not yet exist, so a
    /// manual edit always starts from valid JSON.
    pub fn ensure_exists(&self) -> Result<(), StoreError> {
        if !self.path.exists() {
            fs::write(&self.path, "[]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models_in(tmp: &tempfile::TempDir) -> ModelsFile {
        let dir = ConfigDir::new(tmp.path());
        dir.ensure().expect("ensure");
        ModelsFile::new(&dir)
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let models = models_in(&tmp);
        assert!(models.load().expect("load").is_empty());
    }

    #[test]
    fn upsert_replaces_entry_with_same_model_key() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let models = models_in(&tmp);

        models
            .upsert(RegistryEntry::new("a/b", "v1"))
            .expect("first upsert");
        models
            .upsert(RegistryEntry::new("a/b", "v2"))
            .expect("second upsert");

        let entries = models.load().expect("load");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].version, "v2");
    }

    #[test]
    fn upsert_preserves_entries_for_other_models() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let models = models_in(&tmp);

        models
            .upsert(RegistryEntry::new("a/b", "v1"))
            .expect("upsert a/b");
        models
            .upsert(RegistryEntry::new("c/d", "v9"))
            .expect("upsert c/d");
        models
            .upsert(RegistryEntry::new("a/b", "v2"))
            .expect("replace a/b");

        let entries = models.load().expect("load");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].model, "c/d");
        assert_eq!(entries[1].model, "a/b");
        assert_eq!(entries[1].version, "v2");
    }

    #[test]
    fn chat_flag_is_omitted_when_false() {
        let entry = RegistryEntry::new("a/b", "v1");
        let text = serde_json::to_string(&entry).expect("serialize");
        assert!(!text.contains("chat"));

        let mut chat_entry = RegistryEntry::new("a/b", "v1");
        chat_entry.chat = true;
        let text = serde_json::to_string(&chat_entry).expect("serialize");
        assert!(text.contains("\"chat\":true"));
    }

    #[test]
    fn chat_flag_defaults_to_false_on_load() {
        let entry: RegistryEntry = serde_json::from_str(
            r#"{"model": "a/b", "model_id": "a-b", "version": "v1"}"#,
        )
        .expect("deserialize");
        assert!(!entry.chat);
        assert!(entry.aliases.is_empty());
    }

    #[test]
    fn ensure_exists_initializes_empty_list_once() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let models = models_in(&tmp);

        models.ensure_exists().expect("init");
        assert_eq!(fs::read_to_string(models.path()).expect("read"), "[]");

        models
            .upsert(RegistryEntry::new("a/b", "v1"))
            .expect("upsert");
        models.ensure_exists().expect("no-op");
        assert_eq!(models.load().expect("load").len(), 1);
    }
}
