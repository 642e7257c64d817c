//! Settings loading, validation, and persistence for kabeuchi.
//!
//! Settings live in `~/.kabeuchi/config.toml` and survive across sessions:
//! the API key, the model choice, the last active mode, and per-mode prompt
//! overrides. They are loaded once at startup, mutated only through the
//! validators' accept path, and written back immediately on every accepted
//! mutation (last write wins).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use kabeuchi_core::{Mode, StoreError, ValidationError};
use kabeuchi_security::{validate_api_key, validate_model, validate_prompt};

/// Model used when the settings carry none.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// The persisted settings record.
///
/// Every field is optional: a fresh install has none of them, and absence
/// of a prompt override is distinct from an override equal to the default
/// text.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// The completion-service API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier (allow-list checked on mutation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// The mode that was active when the last session ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    /// Per-mode system-prompt overrides, keyed by mode id. At most one
    /// entry per mode.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub prompts: BTreeMap<String, String>,
}

impl Settings {
    /// The model to request, falling back to [`DEFAULT_MODEL`].
    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// The prompt override for a mode, if one is stored.
    pub fn prompt_override(&self, mode: Mode) -> Option<&str> {
        self.prompts.get(mode.id()).map(String::as_str)
    }

    /// Record an override in memory. Persistence goes through
    /// [`SettingsStore::set_prompt`], which also validates.
    pub fn set_prompt_override(&mut self, mode: Mode, prompt: impl Into<String>) {
        self.prompts.insert(mode.id().to_string(), prompt.into());
    }

    /// The modes that currently carry an override.
    pub fn overridden_modes(&self) -> Vec<Mode> {
        Mode::ALL
            .into_iter()
            .filter(|m| self.prompts.contains_key(m.id()))
            .collect()
    }
}

// The key never appears in Debug output — error payloads and logs may echo
// whatever Debug prints.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("mode", &self.mode)
            .field("prompts", &self.prompts.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// File-backed settings store.
///
/// Reads the whole file once, serves reads from memory, and rewrites the
/// whole file on every accepted mutation. No transactions across keys.
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Open the store at the default location, `~/.kabeuchi/config.toml`.
    ///
    /// A missing file yields default settings; the file is created on the
    /// first accepted mutation. `KABEUCHI_API_KEY` / `OPENAI_API_KEY`
    /// override the stored key for this process without being persisted.
    pub fn open() -> Result<Self, StoreError> {
        let mut store = Self::open_at(Self::default_path())?;
        if let Some(key) = env_api_key() {
            store.settings.api_key = Some(key);
        }
        Ok(store)
    }

    /// Open the store at an explicit path (tests, alternate homes).
    pub fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        let settings = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| StoreError::Serialize(format!("bad settings file: {e}")))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => return Err(StoreError::Io(format!("failed to read settings: {e}"))),
        };
        debug!(path = %path.display(), "settings loaded");
        Ok(Self { path, settings })
    }

    /// `~/.kabeuchi/config.toml`
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// `~/.kabeuchi`
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".kabeuchi")
    }

    /// Read access to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Store a new API key. Rejected keys leave both memory and disk
    /// untouched.
    pub fn set_api_key(&mut self, api_key: &str) -> Result<(), SettingsError> {
        validate_api_key(api_key)?;
        self.settings.api_key = Some(api_key.trim().to_string());
        self.persist()?;
        Ok(())
    }

    /// Store a new model choice, allow-list checked.
    pub fn set_model(&mut self, model: &str) -> Result<(), SettingsError> {
        validate_model(model)?;
        self.settings.model = Some(model.to_string());
        self.persist()?;
        Ok(())
    }

    /// Remember the active mode across sessions.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), SettingsError> {
        self.settings.mode = Some(mode);
        self.persist()?;
        Ok(())
    }

    /// Store a prompt override for a mode. The text is length-checked and
    /// trimmed; storing text equal to the default is allowed and distinct
    /// from having no override.
    pub fn set_prompt(&mut self, mode: Mode, prompt: &str) -> Result<(), SettingsError> {
        validate_prompt(prompt)?;
        self.settings.set_prompt_override(mode, prompt.trim());
        self.persist()?;
        Ok(())
    }

    /// Drop the override for a mode, falling back to the built-in default.
    /// Returns whether an override was present.
    pub fn reset_prompt(&mut self, mode: Mode) -> Result<bool, SettingsError> {
        let removed = self.settings.prompts.remove(mode.id()).is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("failed to create config dir: {e}")))?;
        }
        let content = toml::to_string_pretty(&self.settings)
            .map_err(|e| StoreError::Serialize(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::Io(format!("failed to write settings: {e}")))?;
        Ok(())
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A settings mutation failure: rejected input or a failed write.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<SettingsError> for kabeuchi_core::SessionError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Validation(e) => Self::Validation(e),
            SettingsError::Store(e) => Self::Store(e),
        }
    }
}

fn env_api_key() -> Option<String> {
    ["KABEUCHI_API_KEY", "OPENAI_API_KEY"]
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .filter(|v| !v.trim().is_empty())
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::open_at(dir.path().join("config.toml")).unwrap()
    }

    fn valid_key() -> String {
        format!("sk-{}", "a1b2c3d4e5f6g7h8i9j0")
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.settings().api_key.is_none());
        assert!(store.settings().prompts.is_empty());
        assert_eq!(store.settings().model_or_default(), DEFAULT_MODEL);
    }

    #[test]
    fn accepted_mutations_persist_immediately() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set_api_key(&valid_key()).unwrap();
        store.set_model("gpt-4").unwrap();
        store.set_mode(Mode::Wall).unwrap();

        // A second store sees every write without an explicit save call.
        let reloaded = store_in(&dir);
        assert_eq!(reloaded.settings().api_key.as_deref(), Some(valid_key().as_str()));
        assert_eq!(reloaded.settings().model.as_deref(), Some("gpt-4"));
        assert_eq!(reloaded.settings().mode, Some(Mode::Wall));
    }

    #[test]
    fn rejected_key_is_not_stored() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.set_api_key("sk-short").is_err());
        assert!(store.settings().api_key.is_none());
        assert!(!dir.path().join("config.toml").exists());
    }

    #[test]
    fn rejected_model_is_not_stored() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.set_model("gpt-5-preview").is_err());
        assert!(store.settings().model.is_none());
    }

    #[test]
    fn prompt_override_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store
            .set_prompt(Mode::Wall, "英語で答えてください。")
            .unwrap();

        let reloaded = store_in(&dir);
        assert_eq!(
            reloaded.settings().prompt_override(Mode::Wall),
            Some("英語で答えてください。")
        );
        assert_eq!(reloaded.settings().prompt_override(Mode::Normal), None);
    }

    #[test]
    fn reset_removes_the_entry_entirely() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set_prompt(Mode::Feedback, "要点のみ。").unwrap();
        assert!(store.reset_prompt(Mode::Feedback).unwrap());
        assert!(!store.reset_prompt(Mode::Feedback).unwrap());

        let reloaded = store_in(&dir);
        assert_eq!(reloaded.settings().prompt_override(Mode::Feedback), None);
    }

    #[test]
    fn blank_prompt_override_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.set_prompt(Mode::Normal, "   ").is_err());
        assert!(store.settings().prompts.is_empty());
    }

    #[test]
    fn debug_never_prints_the_key() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set_api_key(&valid_key()).unwrap();
        let printed = format!("{:?}", store.settings());
        assert!(!printed.contains(&valid_key()));
        assert!(printed.contains("[REDACTED]"));
    }
}
