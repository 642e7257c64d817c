//! Turn and outbound-message value objects.
//!
//! A [`Turn`] is one entry in the per-session history ledger. An
//! [`OutboundMessage`] is one element of the request payload sent to the
//! completion service. They carry the same shape but live on opposite sides
//! of the assembler, and only outbound messages ever carry the `System` role.

use serde::{Deserialize, Serialize};

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The model
    Assistant,
    /// System instructions — never recorded in the ledger
    System,
}

/// One user or assistant message recorded in the session history.
///
/// Turns are immutable once appended; their insertion order is the
/// chronological context the assembler windows over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One element of the role-tagged request payload, built fresh per request
/// and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub role: Role,
    pub content: String,
}

impl OutboundMessage {
    /// The system instruction — always first, exactly once.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Map a ledger turn to its outbound form, role preserved.
    pub fn from_turn(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            content: turn.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_constructors_set_roles() {
        assert_eq!(Turn::user("こんにちは").role, Role::User);
        assert_eq!(Turn::assistant("はい").role, Role::Assistant);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = OutboundMessage::system("instructions");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"instructions"}"#);
    }

    #[test]
    fn from_turn_preserves_role_and_content() {
        let turn = Turn::assistant("了解しました");
        let msg = OutboundMessage::from_turn(&turn);
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "了解しました");
    }
}
