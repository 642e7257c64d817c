//! The message assembler — builds the outbound message sequence for one
//! request, per the active mode's policy.
//!
//! Every sequence opens with exactly one `system` message carrying the
//! effective prompt. What follows depends on the mode:
//!
//! - **Rephrase** wraps the raw input in a fixed source-text / rewritten-
//!   text frame and sends nothing else.
//! - **Feedback** folds a rendered transcript of the last turns and the raw
//!   input into a single extraction instruction.
//! - **Normal / Wall / PreInterview** forward the history window verbatim,
//!   then the raw input as the final user message.
//!
//! At assembly time the ledger does not yet contain the raw input; the
//! session records it afterwards.

use kabeuchi_config::Settings;
use kabeuchi_core::{CompletionRequest, Mode, OutboundMessage, Role, TEMPERATURE, Turn};

use crate::ledger::HistoryLedger;
use crate::resolver::resolve;

/// Build the ordered message sequence for one request.
pub fn assemble(
    mode: Mode,
    raw_input: &str,
    ledger: &HistoryLedger,
    settings: &Settings,
) -> Vec<OutboundMessage> {
    let mut messages = vec![OutboundMessage::system(resolve(mode, settings))];

    match mode {
        Mode::Rephrase => {
            messages.push(OutboundMessage::user(rephrase_request(raw_input)));
        }
        Mode::Feedback => {
            let window = ledger.recent(mode.history_window());
            messages.push(OutboundMessage::user(feedback_request(raw_input, window)));
        }
        // Normal / Wall / PreInterview: multi-turn context, forwarded verbatim
        _ => {
            for turn in ledger.recent(mode.history_window()) {
                messages.push(OutboundMessage::from_turn(turn));
            }
            messages.push(OutboundMessage::user(raw_input));
        }
    }

    messages
}

/// Assemble and wrap into the full wire request for `mode`.
pub fn build_request(
    mode: Mode,
    raw_input: &str,
    ledger: &HistoryLedger,
    settings: &Settings,
) -> CompletionRequest {
    CompletionRequest {
        model: settings.model_or_default().to_string(),
        messages: assemble(mode, raw_input, ledger, settings),
        max_tokens: mode.max_tokens(),
        temperature: TEMPERATURE,
    }
}

/// The fixed rephrase frame: the bracketed labels tell the service to emit
/// only the rewritten text, no commentary.
fn rephrase_request(input: &str) -> String {
    format!("[テキスト]\n{input}\n\n[再構成されたテキスト]")
}

/// The feedback extraction instruction: six target categories, the
/// transcript (omitted entirely when there is none), and the current
/// input under its own label.
fn feedback_request(input: &str, window: &[Turn]) -> String {
    let transcript = window
        .iter()
        .map(|turn| match turn.role {
            Role::User => format!("ユーザー: {}", turn.content),
            _ => format!("アシスタント: {}", turn.content),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let history_block = if transcript.is_empty() {
        String::new()
    } else {
        format!("[会話履歴]\n{transcript}\n\n")
    };

    format!(
        "面談のフィードバックを整理してください。以下の内容から、impression（全体的な感想）、\
         attraction（魅力点）、concern（懸念点）、aspiration（志望度）、\
         next_step（次のステップ）、other（その他）を抽出して構造化してください。\n\n\
         {history_block}[今回のフィードバック]\n{input}"
    )
}
