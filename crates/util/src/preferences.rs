//! User preference persistence for Lockpick.
//!
//! A small JSON-backed store for settings that outlive a session: the
//! preferred theme and the widget/match defaults. The file lives in the
//! standard configuration directory (`~/.config/lockpick/preferences.json`
//! on most platforms). Entered PINs are never written here.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use lockpick_types::{CompletionPolicy, KeypadAddressing, LayoutMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{app_config_dir, expand_tilde};

/// Environment variable allowing callers to override the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "LOCKPICK_PREFERENCES_PATH";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted preference values. Every field is optional so that a partial
/// file only overrides what it names.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesPayload {
    /// Canonical identifier of the selected theme.
    pub preferred_theme: Option<String>,
    pub pin_length: Option<usize>,
    pub rounds: Option<usize>,
    pub hints_enabled: Option<bool>,
    /// Round timer in seconds, `0` for none.
    pub timer_duration_secs: Option<u64>,
    pub completion: Option<CompletionPolicy>,
    pub keypad_addressing: Option<KeypadAddressing>,
    pub layout: Option<LayoutMode>,
    /// Terminals narrower than this many columns get the touch layout in `auto` mode.
    pub compact_width: Option<u16>,
}

/// Thread-safe preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: Mutex<PreferencesPayload>,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Load from `$LOCKPICK_PREFERENCES_PATH` or the default config location.
    pub fn new() -> Result<Self, PreferencesError> {
        Self::load_from(default_preferences_path())
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// Build an in-memory store used as a fallback when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(PreferencesPayload::default()),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current values.
    pub fn snapshot(&self) -> PreferencesPayload {
        self.lock().clone()
    }

    /// Returns the canonical identifier of the preferred theme, if one was saved.
    pub fn preferred_theme(&self) -> Option<String> {
        self.lock().preferred_theme.clone()
    }

    /// Persist a new preferred theme identifier.
    pub fn set_preferred_theme(&self, theme_id: Option<String>) -> Result<(), PreferencesError> {
        self.update(|payload| payload.preferred_theme = theme_id)
    }

    /// Apply `change` and write the result to disk (unless ephemeral).
    pub fn update(&self, change: impl FnOnce(&mut PreferencesPayload)) -> Result<(), PreferencesError> {
        let mut payload = self.lock();
        change(&mut payload);
        if self.persist_to_disk {
            self.save_locked(&payload)?;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, PreferencesPayload> {
        self.payload.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn save_locked(&self, payload: &PreferencesPayload) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn default_preferences_path() -> PathBuf {
    if let Ok(path) = env::var(PREFERENCES_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    app_config_dir().join(PREFERENCES_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse preferences file; using defaults"
                );
                Ok(PreferencesPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}
