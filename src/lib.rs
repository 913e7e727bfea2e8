//! Replicate model bridge for command-line LLM tooling.
//!
//! Maps models hosted on [Replicate](https://replicate.com) into a uniform
//! local abstraction that a host CLI can register and prompt, and mirrors
//! remote prediction history into local structured storage.
//!
//! This crate is a facade over the member crates:
//!
//! - [`replicate_core`] — the [`RemoteModel`] trait, [`ModelRegistry`] and
//!   conversation types.
//! - [`replicate_store`] — the on-disk catalog cache, registry file and
//!   prediction table.
//! - [`replicate_provider`] — the Replicate HTTP client, the adapter, and the
//!   prediction history synchronizer.

pub use replicate_core::{
    Conversation, FragmentSink, ModelIdentity, ModelRegistry, PromptTranscript, RemoteModel, Turn,
    error,
};
pub use replicate_provider::{
    DEFAULT_BASE_URL, PredictionSync, ReplicateClient, ReplicateModel, TokenResolver,
    register_models,
};
pub use replicate_store::{
    CatalogCache, ConfigDir, ModelsFile, PredictionTable, RegistryEntry, StoredKeys,
};
