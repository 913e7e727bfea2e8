//! Wire types for the Replicate REST API.
//!
//! Deliberately partial: only the fields the bridge reads are typed. Catalog
//! descriptors and prediction detail payloads are otherwise carried as raw
//! JSON so they can be persisted verbatim.

use serde::Deserialize;
use serde_json::Value;

/// Reference to a model version.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionRef {
    /// Version id, used to address invocations.
    pub id: String,
}

/// The subset of a catalog descriptor needed to build an adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDescriptor {
    /// Account owning the model.
    pub owner: String,
    /// Model name.
    pub name: String,
    /// Most recent published version.
    pub latest_version: VersionRef,
}

/// Response of the individual model detail endpoint.
#[derive(Debug, Deserialize)]
pub struct ModelDetail {
    /// Most recent published version.
    pub latest_version: VersionRef,
}

/// One page of the prediction listing endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictionPage {
    /// Cursor URL of the next page, `null` on the final page.
    pub next: Option<String>,
    /// Lightweight per-prediction summaries.
    pub results: Vec<PredictionSummary>,
}

/// Listing-level view of one prediction: just enough to decide whether its
/// full detail needs fetching.
#[derive(Debug, Deserialize)]
pub struct PredictionSummary {
    /// Remote prediction id.
    pub id: String,
    /// Per-item URLs.
    pub urls: PredictionUrls,
}

/// URLs attached to a prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionUrls {
    /// Detail URL for this prediction.
    pub get: String,
}

/// Live prediction state while polling an invocation.
#[derive(Debug, Deserialize)]
pub struct Prediction {
    /// Remote prediction id.
    pub id: String,
    /// Per-item URLs.
    pub urls: PredictionUrls,
    /// Lifecycle status: `starting`, `processing`, `succeeded`, `failed`
    /// or `canceled`.
    pub status: String,
    /// Output produced so far. Language models return an array of text
    /// fragments that grows while the prediction runs.
    #[serde(default)]
    pub output: Option<Value>,
    /// Remote error text for failed predictions.
    #[serde(default)]
    pub error: Option<Value>,
}

impl Prediction {
    /// Text fragments produced so far, in order.
    #[must_use]
    pub fn output_fragments(&self) -> Vec<String> {
        match &self.output {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(text)) => vec![text.clone()],
            _ => Vec::new(),
        }
    }

    /// Remote error text, or a placeholder when none was supplied.
    #[must_use]
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(text)) => text.clone(),
            Some(other) if !other.is_null() => other.to_string(),
            _ => "no error detail provided".to_string(),
        }
    }
}
