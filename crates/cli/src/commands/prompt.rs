//! `kabeuchi prompt` — per-mode system prompt overrides.

use kabeuchi_config::SettingsStore;
use kabeuchi_security::sanitize_error;
use kabeuchi_session::resolve;

use super::parse_mode;

pub fn show(mode_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mode = parse_mode(mode_id)?;
    let store = open()?;

    let overridden = store.settings().prompt_override(mode).is_some();
    println!(
        "  {} モードのプロンプト{}:",
        mode.spec().label,
        if overridden { "（カスタム）" } else { "（デフォルト）" }
    );
    for line in resolve(mode, store.settings()).lines() {
        println!("    {line}");
    }
    Ok(())
}

pub fn set(mode_id: &str, prompt: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mode = parse_mode(mode_id)?;
    let mut store = open()?;
    store
        .set_prompt(mode, prompt)
        .map_err(|e| sanitize_error(&e.to_string()))?;
    println!("  {}モードのプロンプトを保存しました", mode.spec().label);
    Ok(())
}

pub fn reset(mode_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mode = parse_mode(mode_id)?;
    let mut store = open()?;
    store
        .reset_prompt(mode)
        .map_err(|e| sanitize_error(&e.to_string()))?;
    println!(
        "  {}モードのプロンプトをデフォルトに戻しました",
        mode.spec().label
    );
    Ok(())
}

fn open() -> Result<SettingsStore, Box<dyn std::error::Error>> {
    SettingsStore::open().map_err(|e| sanitize_error(&e.to_string()).into())
}
