//! Startup registration of adapters from the local files.

use crate::auth::TokenResolver;
use crate::model::ReplicateModel;
use crate::types::ModelDescriptor;
use replicate_core::ModelRegistry;
use replicate_store::{CatalogCache, ConfigDir, ModelsFile, StoreError};
use std::sync::Arc;

/// Errors raised while populating the registry from local files.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// A local file could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A cached descriptor was missing an expected key.
    #[error("malformed catalog descriptor: {0}")]
    MalformedDescriptor(#[source] serde_json::Error),

    /// A registry entry's `model` field was not `"owner/name"`.
    #[error("invalid model identifier: {0}")]
    InvalidModel(String),
}

/// Populates `registry` from the catalog cache and the user registry file.
///
/// Two passes into one shared namespace: catalog descriptors first (never
/// chat-style, latest version), then explicitly added entries (pinned
/// version, chat flag, aliases). Registration order makes the second pass
/// win `model_id` collisions, so a manually added model silently shadows a
/// catalog one.
///
/// Either file may be absent; neither is validated beyond deserialization.
pub fn register_models(
    registry: &mut ModelRegistry,
    dir: &ConfigDir,
    auth: &TokenResolver,
    base_url: &str,
) -> Result<(), RegistrationError> {
    if let Some(descriptors) = CatalogCache::new(dir).load()? {
        for raw in descriptors {
            let descriptor: ModelDescriptor = serde_json::from_value(raw)
                .map_err(RegistrationError::MalformedDescriptor)?;
            let model = ReplicateModel::new(
                descriptor.owner,
                descriptor.name,
                descriptor.latest_version.id,
                false,
                auth.clone(),
            )
            .with_base_url(base_url);
            registry.register(Arc::new(model), &[]);
        }
    }

    for entry in ModelsFile::new(dir).load()? {
        let (owner, name) = entry
            .model
            .split_once('/')
            .ok_or_else(|| RegistrationError::InvalidModel(entry.model.clone()))?;
        let model = ReplicateModel::new(owner, name, entry.version, entry.chat, auth.clone())
            .with_base_url(base_url);
        registry.register(Arc::new(model), &entry.aliases);
    }

    tracing::debug!(models = registry.len(), "model registration complete");
    Ok(())
}
