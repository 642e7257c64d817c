//! The closed set of conversational modes and their static policy table.
//!
//! A mode decides which system instruction applies, how much prior
//! conversation is retained, and how raw input is shaped into a request.
//! Modes are statically enumerated — never created at runtime — so every
//! per-mode policy is a `match` arm here rather than a check scattered
//! through the assembler.

use serde::{Deserialize, Serialize};

/// One of the fixed behavioral modes the assistant can operate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Free chat.
    Normal,
    /// Reflective questioning — a sounding-board partner that asks instead
    /// of answering.
    Wall,
    /// Stateless single-shot text rewriting.
    Rephrase,
    /// Interview preparation coaching.
    PreInterview,
    /// Structured feedback extraction from interview notes.
    Feedback,
    /// The date-indexed event planner. Bypasses the completion service.
    Calendar,
}

/// Static per-mode configuration: display strings and the built-in default
/// system instruction.
#[derive(Debug, Clone, Copy)]
pub struct ModeSpec {
    /// Stable identifier, also the serialized form.
    pub id: &'static str,
    /// Display label shown in the UI.
    pub label: &'static str,
    /// Input placeholder text.
    pub placeholder: &'static str,
    /// Message seeded into a fresh session when the mode is entered.
    pub opening_message: Option<&'static str>,
    /// Built-in default system instruction (overridable per mode).
    pub default_prompt: &'static str,
}

impl Mode {
    /// Every mode, in display order.
    pub const ALL: [Mode; 6] = [
        Mode::Normal,
        Mode::Wall,
        Mode::Rephrase,
        Mode::PreInterview,
        Mode::Feedback,
        Mode::Calendar,
    ];

    /// Look up the static configuration for this mode.
    pub fn spec(&self) -> &'static ModeSpec {
        match self {
            Mode::Normal => &ModeSpec {
                id: "normal",
                label: "通常",
                placeholder: "メッセージを入力...",
                opening_message: None,
                default_prompt: "あなたは親切で役立つアシスタントです。日本語で回答してください。",
            },
            Mode::Wall => &ModeSpec {
                id: "wall",
                label: "壁打ち",
                placeholder: "考えていることを書いてみましょう...",
                opening_message: Some(
                    "壁打ちモードです。頭の中にあることを、そのまま書き出してみてください。",
                ),
                default_prompt: "あなたは壁打ちの相手役です。すぐに結論やアドバイスを出さず、\
                    相手の考えを深める質問を中心に返してください。日本語で回答してください。",
            },
            Mode::Rephrase => &ModeSpec {
                id: "rephrase",
                label: "リフレーズ",
                placeholder: "書き直したいテキストを入力...",
                opening_message: None,
                default_prompt: "あなたは文章のリライト専門家です。入力されたテキストの意味を変えずに、\
                    より自然で伝わりやすい日本語に書き直してください。\
                    書き直したテキストだけを出力してください。",
            },
            Mode::PreInterview => &ModeSpec {
                id: "pre_interview",
                label: "面談準備",
                placeholder: "面談の目的や相手を入力...",
                opening_message: Some("面談準備モードです。どんな面談の準備をしますか？"),
                default_prompt: "あなたは採用面談の準備をサポートするコーチです。\
                    面談の目的や相手に応じて、確認すべきポイントや質問の例を提案してください。\
                    日本語で回答してください。",
            },
            Mode::Feedback => &ModeSpec {
                id: "feedback",
                label: "フィードバック",
                placeholder: "面談のフィードバックを入力...",
                opening_message: Some("フィードバックモードです。面談の内容や印象を教えてください。"),
                default_prompt: "あなたは採用面談のフィードバックを整理するアシスタントです。\
                    入力された内容から要点を正確に抽出し、簡潔に構造化してください。\
                    日本語で回答してください。",
            },
            Mode::Calendar => &ModeSpec {
                id: "calendar",
                label: "カレンダー",
                placeholder: "",
                opening_message: None,
                default_prompt: "あなたは予定管理のアシスタントです。",
            },
        }
    }

    /// Parse a mode from its stable identifier.
    pub fn from_id(id: &str) -> Option<Mode> {
        Mode::ALL.iter().copied().find(|m| m.spec().id == id)
    }

    /// The stable identifier for this mode.
    pub fn id(&self) -> &'static str {
        self.spec().id
    }

    /// Whether this mode talks to the completion service at all.
    /// Calendar is a planner surface, not a conversation.
    pub fn is_conversational(&self) -> bool {
        !matches!(self, Mode::Calendar)
    }

    /// Whether turns in this mode are recorded in the history ledger.
    /// Rephrase is stateless per request; Calendar has no turns.
    pub fn records_history(&self) -> bool {
        !matches!(self, Mode::Rephrase | Mode::Calendar)
    }

    /// How many of the most recent ledger turns the assembler forwards.
    pub fn history_window(&self) -> usize {
        match self {
            Mode::Normal | Mode::Wall | Mode::PreInterview => 10,
            Mode::Feedback => 5,
            Mode::Rephrase | Mode::Calendar => 0,
        }
    }

    /// Response token ceiling for this mode's requests.
    ///
    /// The single-shot transformation modes get more room than the
    /// turn-by-turn conversational ones.
    pub fn max_tokens(&self) -> u32 {
        match self {
            Mode::Rephrase | Mode::Feedback => 1000,
            Mode::Normal | Mode::Wall | Mode::PreInterview | Mode::Calendar => 500,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip_for_every_mode() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_id(mode.id()), Some(mode));
        }
    }

    #[test]
    fn unknown_id_rejected() {
        assert_eq!(Mode::from_id("freeform"), None);
        assert_eq!(Mode::from_id(""), None);
    }

    #[test]
    fn serde_uses_snake_case_ids() {
        let json = serde_json::to_string(&Mode::PreInterview).unwrap();
        assert_eq!(json, "\"pre_interview\"");
        let back: Mode = serde_json::from_str("\"wall\"").unwrap();
        assert_eq!(back, Mode::Wall);
    }

    #[test]
    fn window_sizes_are_mode_constants() {
        assert_eq!(Mode::Normal.history_window(), 10);
        assert_eq!(Mode::Wall.history_window(), 10);
        assert_eq!(Mode::PreInterview.history_window(), 10);
        assert_eq!(Mode::Feedback.history_window(), 5);
        assert_eq!(Mode::Rephrase.history_window(), 0);
    }

    #[test]
    fn token_ceilings_per_mode() {
        assert_eq!(Mode::Normal.max_tokens(), 500);
        assert_eq!(Mode::Rephrase.max_tokens(), 1000);
        assert_eq!(Mode::Feedback.max_tokens(), 1000);
    }

    #[test]
    fn rephrase_is_stateless() {
        assert!(!Mode::Rephrase.records_history());
        assert!(Mode::Rephrase.is_conversational());
    }

    #[test]
    fn calendar_bypasses_conversation() {
        assert!(!Mode::Calendar.is_conversational());
        assert!(!Mode::Calendar.records_history());
    }

    #[test]
    fn every_mode_has_a_default_prompt() {
        for mode in Mode::ALL {
            assert!(!mode.spec().default_prompt.is_empty());
        }
    }
}
