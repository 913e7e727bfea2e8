//! Prediction history synchronizer.
//!
//! Reconciles the remote prediction log against the local table in two
//! phases: a lightweight pagination pass that only decides *what* to fetch,
//! then sequential detail fetches for exactly that set. The split keeps the
//! fetch count bounded by genuinely new or in-flight work regardless of how
//! long the remote history grows.

use crate::client::ReplicateClient;
use replicate_core::ModelRegistry;
use replicate_core::error::FetchError;
use replicate_store::{PredictionTable, StoreError};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Errors raised during a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A remote fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The local table could not be updated.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A detail payload arrived without a usable `id`.
    #[error("prediction payload without an id")]
    MissingId,
}

/// Decides whether a prediction's full detail needs (re)fetching.
///
/// - Absent locally: always fetch.
/// - `completed_at` non-null: finished, never re-fetch.
/// - `completed_at` null with status `starting`/`processing`: still
///   in-flight, always re-fetch.
/// - Anything else (canceled, failed, ...): treated as resolved and left
///   alone, so stuck records cannot trigger unbounded re-fetching.
fn needs_fetch(local: Option<&Map<String, Value>>) -> bool {
    let Some(row) = local else {
        return true;
    };
    if row.get("completed_at").is_some_and(|value| !value.is_null()) {
        return false;
    }
    matches!(
        row.get("status").and_then(Value::as_str),
        Some("starting" | "processing")
    )
}

/// One reconciliation of remote prediction history into the local table.
pub struct PredictionSync {
    client: ReplicateClient,
    // version id -> "owner/name", for labeling records.
    version_to_model: HashMap<String, String>,
}

impl PredictionSync {
    /// Creates a synchronizer, building the version lookup from every
    /// remote-backed adapter currently registered.
    #[must_use]
    pub fn new(client: ReplicateClient, registry: &ModelRegistry) -> Self {
        let version_to_model = registry
            .iter()
            .filter_map(|model| {
                model.identity().map(|identity| {
                    (
                        identity.version_id.clone(),
                        format!("{}/{}", identity.owner, identity.name),
                    )
                })
            })
            .collect();
        Self {
            client,
            version_to_model,
        }
    }

    /// Pagination pass: walks the listing to completion and returns, in
    /// discovery order, the detail URL of every prediction that needs
    /// fetching per [`needs_fetch`].
    pub async fn discover(&self, table: &PredictionTable) -> Result<Vec<String>, FetchError> {
        let mut to_fetch = Vec::new();
        let mut next_url = Some(self.client.predictions_url());

        while let Some(url) = next_url {
            let page = self.client.predictions_page(&url).await?;
            next_url = page.next;
            for summary in page.results {
                if needs_fetch(table.get(&summary.id)) {
                    to_fetch.push(summary.urls.get);
                }
            }
        }

        tracing::debug!(count = to_fetch.len(), "predictions to fetch");
        Ok(to_fetch)
    }

    /// Fetches one detail payload, reshapes it and upserts it into `table`.
    ///
    /// Returns the prediction id. The upsert is committed before returning,
    /// so a later failure never rolls it back.
    pub async fn ingest(
        &self,
        table: &mut PredictionTable,
        url: &str,
    ) -> Result<String, SyncError> {
        let payload = self.client.prediction_detail(url).await?;
        let record = self.reshape(payload)?;
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(SyncError::MissingId)?;
        table.upsert(record)?;
        Ok(id)
    }

    /// Reorders a detail payload into the stored record shape: `id` first,
    /// the synthesized `_model_guess` second, then every other field in its
    /// original payload order.
    fn reshape(&self, mut payload: Map<String, Value>) -> Result<Map<String, Value>, SyncError> {
        let id = payload.remove("id").ok_or(SyncError::MissingId)?;

        let guess = payload
            .get("version")
            .and_then(Value::as_str)
            .and_then(|version| self.version_to_model.get(version))
            .map_or(Value::Null, |model| Value::String(model.clone()));

        let mut record = Map::new();
        record.insert("id".to_string(), id);
        record.insert("_model_guess".to_string(), guess);
        for (key, value) in payload {
            record.insert(key, value);
        }
        Ok(record)
    }
}
