//! `kabeuchi chat` — interactive or single-message chat mode.

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use kabeuchi_config::SettingsStore;
use kabeuchi_core::{Mode, SessionError};
use kabeuchi_providers::OpenAiClient;
use kabeuchi_security::sanitize_error;
use kabeuchi_session::ChatSession;

use super::parse_mode;

pub async fn run(
    message: Option<String>,
    mode_id: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open().map_err(|e| sanitize_error(&e.to_string()))?;

    // Check for an API key early — give a clear error before any prompt.
    let Some(api_key) = store.settings().api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one with:");
        eprintln!("    kabeuchi settings set-key sk-...");
        eprintln!();
        eprintln!("  Or export KABEUCHI_API_KEY / OPENAI_API_KEY for this shell.");
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    let client = OpenAiClient::new(api_key);
    let mut session = ChatSession::new(store, client);

    if let Some(id) = mode_id {
        let mode = parse_mode(&id)?;
        session.switch_mode(mode).map_err(display_error)?;
    }

    if let Some(text) = message {
        // Single message mode
        send_and_print(&mut session, &text).await;
        return Ok(());
    }

    interactive(&mut session).await
}

async fn interactive(
    session: &mut ChatSession<OpenAiClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    banner(session);

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    print_input_hint(session).await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            print_input_hint(session).await?;
            continue;
        }

        if matches!(line.as_str(), "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        if line == "/modes" {
            for mode in Mode::ALL {
                let marker = if mode == session.mode() { "*" } else { " " };
                println!("  {marker} {:<14} {}", mode.id(), mode.spec().label);
            }
            print_input_hint(session).await?;
            continue;
        }

        if let Some(rest) = line.strip_prefix("/mode ") {
            handle_mode_switch(session, rest.trim());
            print_input_hint(session).await?;
            continue;
        }

        if session.mode() == Mode::Calendar {
            println!("  カレンダーモードではチャットできません。`kabeuchi calendar list` をどうぞ。");
            print_input_hint(session).await?;
            continue;
        }

        send_and_print(session, &line).await;
        print_input_hint(session).await?;
    }

    Ok(())
}

fn banner(session: &ChatSession<OpenAiClient>) {
    let mode = session.mode();
    println!();
    println!("  kabeuchi — {} モード", mode.spec().label);
    println!("  Model: {}", session.store().settings().model_or_default());
    println!();
    println!("  /mode <id> でモード切替、/modes で一覧、exit で終了。");
    if let Some(opening) = mode.spec().opening_message {
        println!();
        println!("  Assistant > {opening}");
    }
    println!();
}

fn handle_mode_switch(session: &mut ChatSession<OpenAiClient>, id: &str) {
    match parse_mode(id) {
        Ok(mode) => match session.switch_mode(mode) {
            Ok(()) => {
                println!();
                println!("  {} モードに切り替えました。", mode.spec().label);
                if let Some(opening) = mode.spec().opening_message {
                    println!("  Assistant > {opening}");
                }
            }
            Err(e) => println!("  エラー: {}", display_error(e)),
        },
        Err(e) => println!("  {e}"),
    }
}

async fn send_and_print(session: &mut ChatSession<OpenAiClient>, input: &str) {
    let mode = session.mode();
    eprint!("  ...");
    match session.send(input).await {
        Ok(reply) => {
            eprint!("\r     \r");
            println!();
            if mode == Mode::Rephrase {
                // The rephrase surface shows both sides of the rewrite.
                println!("  元のテキスト:");
                for line in input.lines() {
                    println!("    {line}");
                }
                println!("  再構成後:");
                for line in reply.lines() {
                    println!("    {line}");
                }
            } else {
                for line in reply.lines() {
                    println!("  Assistant > {line}");
                }
            }
            println!();
        }
        Err(e) => {
            eprint!("\r     \r");
            println!("  エラー: {}", display_error(e));
        }
    }
}

async fn print_input_hint(
    session: &ChatSession<OpenAiClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    let placeholder = session.mode().spec().placeholder;
    let mut stdout = io::stdout();
    if placeholder.is_empty() {
        stdout.write_all(b"  > ").await?;
    } else {
        stdout.write_all(format!("  [{placeholder}] > ").as_bytes()).await?;
    }
    stdout.flush().await?;
    Ok(())
}

/// Every error string shown to the user passes through the sanitizer —
/// failure payloads may echo the Authorization header.
fn display_error(err: SessionError) -> String {
    sanitize_error(&err.to_string())
}
