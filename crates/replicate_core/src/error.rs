//! Error taxonomy shared across the bridge.

/// No API token could be resolved from any of the supported sources.
///
/// The message names every resolution path so the user can act on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Pass --key, store a 'replicate' key or set the REPLICATE_API_TOKEN environment variable."
)]
pub struct AuthError;

/// A remote fetch failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure before a usable response was received.
    #[error("http error: {0}")]
    Http(String),

    /// Non-success HTTP status. `detail` carries the response body, or the
    /// target URL when the body is not useful to the user.
    #[error("error fetching {subject}: {detail}")]
    Remote {
        /// What was being fetched, e.g. `"models"` or `"prediction details"`.
        subject: &'static str,
        /// Response body or target URL.
        detail: String,
    },

    /// The response was readable but not the shape we expected.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors raised while invoking a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A conversation was supplied to a model without chat support.
    #[error("conversation mode is not supported")]
    ConversationUnsupported,

    /// The remote prediction reached a terminal state other than success.
    #[error("prediction {status}: {message}")]
    PredictionFailed {
        /// Terminal status reported by the remote service.
        status: String,
        /// Remote error text, if any.
        message: String,
    },

    /// The `"owner/name:version"` reference could not be parsed.
    #[error("invalid model reference: {0}")]
    InvalidReference(String),

    /// No API token could be resolved.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The underlying remote call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
