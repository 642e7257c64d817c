//! `kabeuchi settings` — show or change the stored API key and model.

use kabeuchi_config::SettingsStore;
use kabeuchi_security::sanitize_error;

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let store = open()?;
    let settings = store.settings();

    println!("  Config:  {}", store.path().display());
    println!(
        "  API key: {}",
        if settings.api_key.is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!("  Model:   {}", settings.model_or_default());
    if let Some(mode) = settings.mode {
        println!("  Mode:    {} ({})", mode.id(), mode.spec().label);
    }
    if !settings.prompts.is_empty() {
        let overridden: Vec<&str> = settings
            .overridden_modes()
            .into_iter()
            .map(|m| m.id())
            .collect();
        println!("  Prompt overrides: {}", overridden.join(", "));
    }
    Ok(())
}

pub fn set_key(api_key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open()?;
    store
        .set_api_key(api_key)
        .map_err(|e| sanitize_error(&e.to_string()))?;
    println!("  設定を保存しました");
    Ok(())
}

pub fn set_model(model: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open()?;
    store
        .set_model(model)
        .map_err(|e| sanitize_error(&e.to_string()))?;
    println!("  設定を保存しました");
    Ok(())
}

fn open() -> Result<SettingsStore, Box<dyn std::error::Error>> {
    SettingsStore::open().map_err(|e| sanitize_error(&e.to_string()).into())
}
