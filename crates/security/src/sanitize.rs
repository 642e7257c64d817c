//! Error-message sanitization.
//!
//! Error payloads may echo request content, including the Authorization
//! header, so every string destined for display or logs passes through
//! [`sanitize_error`] — not just the network paths.

use std::sync::OnceLock;

use regex::Regex;

/// The fixed token substituted for any secret-shaped substring.
pub const REDACTION: &str = "sk-***";

fn secret_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"sk-[A-Za-z0-9]{20,}").expect("secret pattern is valid"))
}

/// Replace every substring matching the secret-key shape with
/// [`REDACTION`].
pub fn sanitize_error(message: &str) -> String {
    secret_pattern().replace_all(message, REDACTION).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_key_redacted() {
        let key = format!("sk-{}", "a1b2c3d4e5f6g7h8i9j0");
        let message = format!("401 Unauthorized: bad key {key} in header");
        let clean = sanitize_error(&message);
        assert!(!clean.contains(&key));
        assert!(clean.contains(REDACTION));
        assert!(clean.contains("401 Unauthorized"));
    }

    #[test]
    fn multiple_keys_all_redacted() {
        let message = format!(
            "tried sk-{} then sk-{}",
            "x".repeat(20),
            "y".repeat(32)
        );
        let clean = sanitize_error(&message);
        assert_eq!(clean, format!("tried {REDACTION} then {REDACTION}"));
    }

    #[test]
    fn short_prefix_left_alone() {
        // 19 trailing chars — not secret-shaped, nothing to hide
        let message = format!("value sk-{} is malformed", "a".repeat(19));
        assert_eq!(sanitize_error(&message), message);
    }

    #[test]
    fn plain_messages_untouched() {
        let message = "API呼び出しに失敗しました";
        assert_eq!(sanitize_error(message), message);
    }
}
