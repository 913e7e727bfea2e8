//! Uniform invocable model abstraction.

use crate::error::ModelError;
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;

/// Ordered sink for streamed output fragments.
///
/// Adapters forward each fragment as it arrives and never buffer;
/// concatenation, if needed, is the consumer's responsibility.
pub type FragmentSink = mpsc::UnboundedSender<String>;

/// One prior prompt/response exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// The prompt that was submitted.
    pub prompt: String,
    /// The response text that came back.
    pub response: String,
}

/// Ordered conversation history, oldest turn first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    /// Completed turns, oldest first.
    pub turns: Vec<Turn>,
}

impl Conversation {
    /// Creates an empty conversation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed turn.
    pub fn push(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.turns.push(Turn {
            prompt: prompt.into(),
            response: response.into(),
        });
    }

    /// Returns `true` if no turns have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// The exact line sequence used to construct a submitted prompt.
///
/// Attached to every invocation result, even in the non-chat case (where it
/// wraps the raw prompt as a single line), so that what was sent to the
/// remote service is exactly reconstructable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptTranscript {
    /// Prompt lines in submission order.
    pub lines: Vec<String>,
}

impl PromptTranscript {
    /// The submitted prompt: all lines joined without a separator.
    #[must_use]
    pub fn joined(&self) -> String {
        self.lines.concat()
    }
}

/// Remote identity of a model hosted on Replicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelIdentity {
    /// Account that owns the model.
    pub owner: String,
    /// Model name within the owner's namespace.
    pub name: String,
    /// Pinned version id used for invocation.
    pub version_id: String,
}

/// An invocable unit wrapping one remote model.
///
/// Implemented by a single concrete adapter type distinguished by a
/// chat-capability field rather than by subtype.
#[async_trait]
pub trait RemoteModel: Send + Sync {
    /// Stable identifier used for registry lookups.
    fn model_id(&self) -> &str;

    /// Remote identity, for adapters backed by a hosted model.
    fn identity(&self) -> Option<&ModelIdentity> {
        None
    }

    /// Invokes the model with `prompt`, optionally continuing `conversation`.
    ///
    /// Output fragments are forwarded to `sink` in arrival order. Returns the
    /// [`PromptTranscript`] recording exactly what was submitted.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ConversationUnsupported`] — before any remote
    /// call — when a conversation is supplied to a non-chat model, and
    /// propagates any transport or remote-side failure unhandled.
    async fn invoke(
        &self,
        prompt: &str,
        conversation: Option<&Conversation>,
        sink: FragmentSink,
    ) -> Result<PromptTranscript, ModelError>;
}
