//! Completion-service client implementations.
//!
//! One backend today: the OpenAI chat-completions endpoint. The session
//! core only sees the [`kabeuchi_core::CompletionClient`] trait.

pub mod openai;

pub use openai::OpenAiClient;
