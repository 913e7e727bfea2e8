//! Authenticated HTTP client for the Replicate REST API.

use crate::types::{ModelDetail, Prediction, PredictionPage};
use replicate_core::FragmentSink;
use replicate_core::error::{FetchError, ModelError};
use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value, json};
use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.replicate.com";

/// Interval between polls of an in-flight prediction.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// HTTP client for the Replicate API.
///
/// Every call carries a `Authorization: Token {token}` header. No retries:
/// a single network failure surfaces directly to the caller.
#[derive(Clone)]
pub struct ReplicateClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ReplicateClient {
    /// Creates a client against the production endpoint.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the base URL (test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The configured base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the first prediction listing page.
    #[must_use]
    pub fn predictions_url(&self) -> String {
        format!("{}/v1/predictions", self.base_url)
    }

    async fn get_text(&self, url: &str, subject: &'static str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .send()
            .await
            .map_err(|err| FetchError::Http(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Http(err.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Remote {
                subject,
                detail: body,
            });
        }
        Ok(body)
    }

    fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, FetchError> {
        serde_json::from_str(body)
            .map_err(|err| FetchError::InvalidResponse(format!("{err}\nBody: {body}")))
    }

    /// Fetches the curated language-models collection.
    ///
    /// Returns the raw `models` array so it can be cached verbatim.
    pub async fn fetch_language_models(&self) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}/v1/collections/language-models", self.base_url);
        let body = self.get_text(&url, "models").await?;
        let value: Value = Self::parse(&body)?;
        match value.get("models").and_then(Value::as_array) {
            Some(models) => Ok(models.clone()),
            None => Err(FetchError::InvalidResponse(
                "collection response without a 'models' array".to_string(),
            )),
        }
    }

    /// Fetches the detail record of one model (`"owner/name"`).
    pub async fn fetch_model_detail(&self, model: &str) -> Result<ModelDetail, FetchError> {
        let url = format!("{}/v1/models/{}", self.base_url, model);
        let body = self.get_text(&url, "model details").await?;
        Self::parse(&body)
    }

    /// Resolves the latest published version id of `model`.
    pub async fn latest_version(&self, model: &str) -> Result<String, FetchError> {
        Ok(self.fetch_model_detail(model).await?.latest_version.id)
    }

    /// Fetches one page of the prediction listing.
    pub async fn predictions_page(&self, url: &str) -> Result<PredictionPage, FetchError> {
        let body = self.get_text(url, "predictions").await?;
        Self::parse(&body)
    }

    /// Fetches the full detail payload of one prediction.
    ///
    /// On a non-success status the error names the URL rather than echoing
    /// the body.
    pub async fn prediction_detail(&self, url: &str) -> Result<Map<String, Value>, FetchError> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .send()
            .await
            .map_err(|err| FetchError::Http(err.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Remote {
                subject: "prediction details",
                detail: url.to_string(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Http(err.to_string()))?;
        Self::parse(&body)
    }

    /// Live state of one prediction, for polling an invocation.
    async fn get_prediction(&self, url: &str) -> Result<Prediction, FetchError> {
        let body = self.get_text(url, "prediction details").await?;
        Self::parse(&body)
    }

    /// Starts a prediction for `version` with the given prompt.
    pub async fn create_prediction(
        &self,
        version: &str,
        prompt: &str,
    ) -> Result<Prediction, FetchError> {
        let url = self.predictions_url();
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .json(&json!({
                "version": version,
                "input": {"prompt": prompt},
            }))
            .send()
            .await
            .map_err(|err| FetchError::Http(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Http(err.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Remote {
                subject: "prediction",
                detail: body,
            });
        }
        Self::parse(&body)
    }

    /// Runs a model to completion, forwarding output fragments to `sink`.
    ///
    /// `model_ref` is the `"owner/name:version"` form; only the version
    /// addresses the prediction on the wire. The prediction is created, then
    /// polled until it reaches a terminal status; each poll forwards only the
    /// fragments appended since the previous one.
    pub async fn run(
        &self,
        model_ref: &str,
        prompt: &str,
        sink: &FragmentSink,
    ) -> Result<(), ModelError> {
        let version = model_ref
            .rsplit_once(':')
            .map(|(_, version)| version)
            .ok_or_else(|| ModelError::InvalidReference(model_ref.to_string()))?;

        tracing::debug!(model_ref, "starting prediction");
        let mut prediction = self.create_prediction(version, prompt).await?;
        let mut emitted = 0usize;

        loop {
            let fragments = prediction.output_fragments();
            for fragment in fragments.iter().skip(emitted) {
                let _ = sink.send(fragment.clone());
            }
            emitted = emitted.max(fragments.len());

            match prediction.status.as_str() {
                "succeeded" => {
                    tracing::debug!(id = %prediction.id, fragments = emitted, "prediction succeeded");
                    return Ok(());
                }
                "failed" | "canceled" => {
                    return Err(ModelError::PredictionFailed {
                        status: prediction.status.clone(),
                        message: prediction.error_message(),
                    });
                }
                _ => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                    prediction = self.get_prediction(&prediction.urls.get).await?;
                }
            }
        }
    }
}

impl core::fmt::Debug for ReplicateClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReplicateClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
