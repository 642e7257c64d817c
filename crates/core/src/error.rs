//! Error types for the kabeuchi domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Each bounded context
//! has its own error enum; nothing here is fatal to the process — every
//! failure path returns control to an idle input state.

use thiserror::Error;

use crate::mode::Mode;

/// The top-level error type for all kabeuchi operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Input rejected before any network use. Shown inline, no retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("API Keyの形式が正しくありません")]
    InvalidApiKey,

    #[error("無効なモデル名です: {model}")]
    UnknownModel { model: String },

    #[error("プロンプトが空です")]
    EmptyPrompt,

    #[error("プロンプトが長すぎます（最大{max}文字）")]
    TooLong { max: usize },

    #[error("タイトルが長すぎます（最大{max}文字）")]
    TitleTooLong { max: usize },

    #[error("説明が長すぎます（最大{max}文字）")]
    DescriptionTooLong { max: usize },

    #[error("日付の形式が正しくありません: {date}")]
    BadDate { date: String },
}

/// Failures from the completion service round trip.
///
/// `Network` and `Api` are transport failures (no automatic retry, the user
/// must resend); `MalformedResponse` is a protocol failure — the service
/// answered but the expected fields were missing.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("APIレスポンスの形式が正しくありません: {0}")]
    MalformedResponse(String),
}

/// Failures surfaced by the chat session itself.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A request is already in flight; exactly one may be at a time.
    #[error("a completion request is already in flight")]
    Busy,

    #[error("API Keyが設定されていません。設定からAPI Keyを入力してください。")]
    NotConfigured,

    /// The active mode does not talk to the completion service.
    #[error("mode '{0}' does not send completion requests")]
    NotAConversation(Mode),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Settings or calendar persistence failures. Last write wins; no
/// durability guarantees beyond that.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("invalid event: {0}")]
    InvalidEvent(#[from] ValidationError),
}
