//! Replicate API integration.
//!
//! Everything that talks to the Replicate service or understands its wire
//! shapes lives here:
//!
//! - [`ReplicateClient`] — thin authenticated HTTP client over the REST API.
//! - [`ReplicateModel`] — the adapter wrapping one hosted model into a
//!   [`RemoteModel`](replicate_core::RemoteModel), including chat prompt
//!   construction and output streaming.
//! - [`register_models`] — the two-pass startup registration from the catalog
//!   cache and the user registry file.
//! - [`PredictionSync`] — reconciliation of remote prediction history into
//!   the local table.
//! - [`TokenResolver`] — API token resolution with explicit-override, stored
//!   key and environment variable precedence.

mod auth;
mod client;
mod model;
mod registration;
mod sync;
pub mod types;

pub use auth::{REPLICATE_KEY_NAME, TOKEN_ENV_VAR, TokenResolver};
pub use client::{DEFAULT_BASE_URL, ReplicateClient};
pub use model::ReplicateModel;
pub use registration::{RegistrationError, register_models};
pub use sync::{PredictionSync, SyncError};
