//! Input validators — the gate in front of the assembler.
//!
//! Everything here is checked before a request payload is built, so a bad
//! key, an unknown model, or an oversized prompt never reaches the network.

use kabeuchi_core::ValidationError;

/// The fixed set of supported model identifiers.
pub const ALLOWED_MODELS: [&str; 3] = ["gpt-3.5-turbo", "gpt-4", "gpt-4-turbo"];

/// Prompt character ceiling (characters, not bytes).
pub const MAX_PROMPT_CHARS: usize = 10_000;

/// Check the secret-key shape: `sk-` followed by at least 20 ASCII
/// alphanumerics. The value is trimmed first; anything shorter or shaped
/// differently is rejected before any network use.
pub fn validate_api_key(api_key: &str) -> Result<(), ValidationError> {
    let key = api_key.trim();
    let rest = key.strip_prefix("sk-").ok_or(ValidationError::InvalidApiKey)?;
    if rest.len() < 20 || !rest.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidApiKey);
    }
    Ok(())
}

/// Check allow-list membership for a model identifier.
pub fn validate_model(model: &str) -> Result<(), ValidationError> {
    if ALLOWED_MODELS.contains(&model) {
        Ok(())
    } else {
        Err(ValidationError::UnknownModel {
            model: model.to_string(),
        })
    }
}

/// Check prompt length bounds: non-blank, at most [`MAX_PROMPT_CHARS`]
/// characters.
pub fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().is_empty() {
        return Err(ValidationError::EmptyPrompt);
    }
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(ValidationError::TooLong {
            max: MAX_PROMPT_CHARS,
        });
    }
    Ok(())
}
