//! Effective-prompt resolution.
//!
//! The effective prompt is a derived value, recomputed on every read: the
//! stored override when it has content, otherwise the mode's built-in
//! default. The caller owns settings freshness — no storage access here.

use kabeuchi_config::Settings;
use kabeuchi_core::Mode;

/// The system instruction actually used for `mode`.
pub fn resolve<'a>(mode: Mode, settings: &'a Settings) -> &'a str {
    match settings.prompt_override(mode) {
        Some(text) if !text.trim().is_empty() => text,
        _ => mode.spec().default_prompt,
    }
}
