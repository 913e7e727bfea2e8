//! Model adapter registry.

use crate::model::RemoteModel;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared namespace of registered model adapters.
///
/// Populated once at startup by the host via [`register`](Self::register) —
/// plain dependency injection, not a hook system. Registration order matters:
/// on a `model_id` collision the last registered adapter silently wins, which
/// is how a manually added model shadows a catalog one.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<dyn RemoteModel>>,
    // Maps alias -> model_id.
    aliases: HashMap<String, String>,
}

impl core::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.model_ids())
            .field("aliases", &self.aliases)
            .finish()
    }
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter under its `model_id`, with optional aliases.
    ///
    /// Replaces any previously registered adapter with the same `model_id`.
    /// Aliases likewise point at the most recent registration.
    pub fn register(&mut self, model: Arc<dyn RemoteModel>, aliases: &[String]) {
        let model_id = model.model_id().to_string();
        for alias in aliases {
            self.aliases.insert(alias.clone(), model_id.clone());
        }
        self.models.insert(model_id, model);
    }

    /// Looks up an adapter by `model_id` or alias.
    #[must_use]
    pub fn get(&self, id_or_alias: &str) -> Option<Arc<dyn RemoteModel>> {
        if let Some(model) = self.models.get(id_or_alias) {
            return Some(model.clone());
        }
        let model_id = self.aliases.get(id_or_alias)?;
        self.models.get(model_id).cloned()
    }

    /// Checks whether a `model_id` is registered.
    #[must_use]
    pub fn contains(&self, model_id: &str) -> bool {
        self.models.contains_key(model_id)
    }

    /// Iterates over every registered adapter.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn RemoteModel>> {
        self.models.values()
    }

    /// Lists registered model ids.
    #[must_use]
    pub fn model_ids(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }

    /// Number of registered adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
