//! Security module for kabeuchi — input validation and secret redaction.
//!
//! Provides:
//! - **Validators**: API-key shape, model allow-list, prompt length —
//!   all run before any assembly or network use
//! - **Sanitization**: secret-shaped substrings scrubbed from every
//!   user-visible error string

pub mod sanitize;
pub mod validate;

pub use sanitize::{REDACTION, sanitize_error};
pub use validate::{ALLOWED_MODELS, MAX_PROMPT_CHARS, validate_api_key, validate_model, validate_prompt};
