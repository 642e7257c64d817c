//! CompletionClient trait — the abstraction over the remote completion
//! service.
//!
//! The session assembles a request and hands it to a client without knowing
//! which backend is configured. The client owns transport concerns
//! (endpoint, auth header, timeout); the core enforces none of them.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CompletionError;
use crate::message::OutboundMessage;

/// Sampling temperature, fixed for every mode.
pub const TEMPERATURE: f32 = 0.7;

/// One assembled completion request, mirroring the wire contract:
/// `{model, messages, max_tokens, temperature}`.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// The model identifier (allow-list checked before assembly).
    pub model: String,

    /// The outbound message sequence. `system` appears exactly once, first.
    pub messages: Vec<OutboundMessage>,

    /// Per-mode response token ceiling.
    pub max_tokens: u32,

    /// Always [`TEMPERATURE`].
    pub temperature: f32,
}

/// The completion service boundary.
///
/// Returns the first choice's message content as plain text, or a typed
/// failure. There is no streaming and no cancellation; the implementation
/// owns the request timeout.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// A human-readable name for this client (e.g. "openai").
    fn name(&self) -> &str;

    /// Send a request and return the response text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<String, CompletionError>;
}
