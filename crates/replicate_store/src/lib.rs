//! On-disk state for the Replicate bridge.
//!
//! Four independently owned files live under one configuration directory:
//!
//! | File | Owner | Contents |
//! |------|-------|----------|
//! | `fetch-models.json` | [`CatalogCache`] | curated catalog, cached verbatim |
//! | `models.json` | [`ModelsFile`] | user-managed registry entries |
//! | `keys.json` | [`StoredKeys`] | named API keys |
//! | `predictions.json` | [`PredictionTable`] | keyed prediction records |
//!
//! The directory itself is an explicitly passed [`ConfigDir`] value — no
//! implicit global state — with idempotent on-demand creation.
//!
//! All files are plain JSON and assumed single-writer (one CLI invocation at
//! a time); no locking is performed.

mod catalog;
mod dir;
mod error;
mod keys;
mod models_file;
mod predictions;

pub use catalog::CatalogCache;
pub use dir::ConfigDir;
pub use error::StoreError;
pub use keys::StoredKeys;
pub use models_file::{ModelsFile, RegistryEntry};
pub use predictions::PredictionTable;
