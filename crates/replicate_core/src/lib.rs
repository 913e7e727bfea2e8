//! Model abstraction layer for the Replicate bridge.
//!
//! Provides the uniform surface a host CLI programs against, decoupling it
//! from how any particular remote model is addressed or prompted:
//!
//! - [`RemoteModel`] — one invocable unit wrapping a remote model's identity
//!   and prompt-construction logic.
//! - [`ModelRegistry`] — the shared namespace adapters are registered into at
//!   startup, with alias resolution.
//! - [`Conversation`] / [`PromptTranscript`] — prompt history going in, and
//!   the exact line sequence that was submitted coming back out.
//!
//! Adapters stream output through a [`FragmentSink`]; the consumer drains the
//! channel while the adapter forwards fragments in arrival order.

pub mod error;
mod model;
mod registry;

pub use model::{Conversation, FragmentSink, ModelIdentity, PromptTranscript, RemoteModel, Turn};
pub use registry::ModelRegistry;
