//! The Replicate model adapter.

use crate::auth::TokenResolver;
use crate::client::{DEFAULT_BASE_URL, ReplicateClient};
use async_trait::async_trait;
use replicate_core::error::ModelError;
use replicate_core::{Conversation, FragmentSink, ModelIdentity, PromptTranscript, RemoteModel};

/// Wraps one Replicate-hosted model as an invocable unit.
///
/// A single concrete type covers both prompt styles; `chat` selects between
/// the raw prompt and the `User:`/`Assistant:` turn format.
pub struct ReplicateModel {
    model_id: String,
    identity: ModelIdentity,
    chat: bool,
    auth: TokenResolver,
    base_url: String,
}

impl ReplicateModel {
    /// Creates an adapter for `owner/name` at `version_id`.
    ///
    /// The computed `model_id` is `"replicate-{owner}-{name}"`; when the
    /// owner itself is `replicate` the doubled prefix collapses to
    /// `"replicate-{name}"`.
    #[must_use]
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        version_id: impl Into<String>,
        chat: bool,
        auth: TokenResolver,
    ) -> Self {
        let identity = ModelIdentity {
            owner: owner.into(),
            name: name.into(),
            version_id: version_id.into(),
        };
        let mut model_id = format!("replicate-{}-{}", identity.owner, identity.name);
        if let Some(rest) = model_id.strip_prefix("replicate-replicate-") {
            model_id = format!("replicate-{rest}");
        }
        Self {
            model_id,
            identity,
            chat,
            auth,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether this adapter uses the chat prompt format.
    #[must_use]
    pub fn is_chat(&self) -> bool {
        self.chat
    }

    /// The `"owner/name:version"` reference submitted on invocation.
    #[must_use]
    pub fn model_ref(&self) -> String {
        format!(
            "{}/{}:{}",
            self.identity.owner, self.identity.name, self.identity.version_id
        )
    }

    /// Builds the chat-format line sequence: each prior turn as a
    /// `User:`/`Assistant:` pair, then the current prompt and a final
    /// `"Assistant:"` line with no trailing newline.
    fn build_chat_lines(&self, prompt: &str, conversation: Option<&Conversation>) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(conversation) = conversation {
            for turn in &conversation.turns {
                lines.push(format!("User: {}\n", turn.prompt));
                lines.push(format!("Assistant: {}\n", turn.response));
            }
        }
        lines.push(format!("User: {prompt}\n"));
        lines.push("Assistant:".to_string());
        lines
    }
}

#[async_trait]
impl RemoteModel for ReplicateModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn identity(&self) -> Option<&ModelIdentity> {
        Some(&self.identity)
    }

    async fn invoke(
        &self,
        prompt: &str,
        conversation: Option<&Conversation>,
        sink: FragmentSink,
    ) -> Result<PromptTranscript, ModelError> {
        if conversation.is_some() && !self.chat {
            return Err(ModelError::ConversationUnsupported);
        }

        let lines = if self.chat {
            self.build_chat_lines(prompt, conversation)
        } else {
            vec![prompt.to_string()]
        };
        let transcript = PromptTranscript { lines };

        let token = self.auth.resolve()?;
        let client = ReplicateClient::new(token).with_base_url(self.base_url.clone());
        client
            .run(&self.model_ref(), &transcript.joined(), &sink)
            .await?;

        Ok(transcript)
    }
}

impl core::fmt::Display for ReplicateModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.chat {
            write!(f, "Replicate (chat): {}", self.model_id)
        } else {
            write!(f, "Replicate: {}", self.model_id)
        }
    }
}

impl core::fmt::Debug for ReplicateModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReplicateModel")
            .field("model_id", &self.model_id)
            .field("identity", &self.identity)
            .field("chat", &self.chat)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replicate_store::{ConfigDir, StoredKeys};
    use tokio::sync::mpsc;

    fn test_auth() -> TokenResolver {
        let dir = ConfigDir::new("/nonexistent/never-created");
        TokenResolver::new(Some("test-token".to_string()), StoredKeys::new(&dir))
    }

    fn adapter(owner: &str, name: &str, chat: bool) -> ReplicateModel {
        ReplicateModel::new(owner, name, "v1", chat, test_auth())
    }

    #[test]
    fn model_id_joins_owner_and_name() {
        assert_eq!(adapter("O", "X", false).model_id(), "replicate-O-X");
        assert_eq!(
            adapter("joehoover", "falcon-40b-instruct", true).model_id(),
            "replicate-joehoover-falcon-40b-instruct"
        );
    }

    #[test]
    fn model_id_collapses_doubled_replicate_prefix() {
        assert_eq!(adapter("replicate", "X", false).model_id(), "replicate-X");
        assert_eq!(
            adapter("replicate", "flan-t5-xl", false).model_id(),
            "replicate-flan-t5-xl"
        );
    }

    #[test]
    fn display_marks_chat_capability() {
        assert_eq!(adapter("a", "b", true).to_string(), "Replicate (chat): replicate-a-b");
        assert_eq!(adapter("a", "b", false).to_string(), "Replicate: replicate-a-b");
    }

    #[test]
    fn model_ref_addresses_pinned_version() {
        assert_eq!(adapter("a", "b", false).model_ref(), "a/b:v1");
    }

    #[test]
    fn chat_lines_format_prior_turns_then_prompt() {
        let model = adapter("a", "b", true);
        let mut conversation = Conversation::new();
        conversation.push("hi", "hello world");

        let lines = model.build_chat_lines("and again", Some(&conversation));
        assert_eq!(
            lines,
            vec![
                "User: hi\n",
                "Assistant: hello world\n",
                "User: and again\n",
                "Assistant:",
            ]
        );
        assert_eq!(
            lines.concat(),
            "User: hi\nAssistant: hello world\nUser: and again\nAssistant:"
        );
    }

    #[test]
    fn chat_lines_without_history() {
        let model = adapter("a", "b", true);
        let lines = model.build_chat_lines("say hi", None);
        assert_eq!(lines, vec!["User: say hi\n", "Assistant:"]);
    }

    #[tokio::test]
    async fn conversation_against_non_chat_model_fails_without_network() {
        // No HTTP server exists at this base URL; the error must come from
        // the capability check, not from a connection attempt.
        let model = adapter("a", "b", false).with_base_url("http://127.0.0.1:1");
        let conversation = Conversation {
            turns: vec![replicate_core::Turn {
                prompt: "hi".to_string(),
                response: "hello".to_string(),
            }],
        };
        let (sink, mut rx) = mpsc::unbounded_channel();

        let err = model
            .invoke("again", Some(&conversation), sink)
            .await
            .expect_err("must be rejected");
        assert!(matches!(err, ModelError::ConversationUnsupported));
        assert!(rx.try_recv().is_err(), "no fragments may be emitted");
    }
}
