//! Persistent settings
//!
//! The only durable state is the user's format string, kept in a small TOML
//! file in the application data directory:
//!
//! ```toml
//! [options]
//! format_string = "{name:.50} - {album:.50} ({player position} / {duration})"
//! ```
//!
//! Set `SPOTIFY_MENUBAR_SETTINGS` to use a different file.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::format::{FormatTemplate, DEFAULT_FORMAT_STRING};
use crate::platform;

/// Environment variable overriding the settings file location
pub const SETTINGS_PATH_ENV: &str = "SPOTIFY_MENUBAR_SETTINGS";

/// Settings file name inside the data directory
pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub options: Options,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub format_string: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format_string: DEFAULT_FORMAT_STRING.to_string(),
        }
    }
}

impl Settings {
    /// The stored format string, or the default when it does not parse
    pub fn template(&self) -> FormatTemplate {
        FormatTemplate::parse(&self.options.format_string).unwrap_or_else(|e| {
            warn!(
                "Stored format string '{}' is invalid ({e}), using default",
                self.options.format_string
            );
            FormatTemplate::default()
        })
    }
}

/// Reads and writes the settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file from `SPOTIFY_MENUBAR_SETTINGS` or the data directory
    pub fn locate() -> Result<Self> {
        if let Some(path) = env::var_os(SETTINGS_PATH_ENV) {
            return Ok(Self::new(path));
        }
        Ok(Self::new(platform::data_dir()?.join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(&self) -> Settings {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No settings at {}, using defaults", self.path.display());
                return Settings::default();
            }
            Err(e) => {
                warn!("Failed to read {}: {e}, using defaults", self.path.display());
                return Settings::default();
            }
        };

        toml::from_str(&text).unwrap_or_else(|e| {
            warn!("Failed to parse {}: {e}, using defaults", self.path.display());
            Settings::default()
        })
    }

    /// Write settings, creating the data directory if needed
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let text = toml::to_string(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));
        let settings = store.load();
        assert_eq!(settings.options.format_string, DEFAULT_FORMAT_STRING);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.toml"));
        let mut settings = Settings::default();
        settings.options.format_string = r#"{artist} "{name}" \ {album}"#.to_string();

        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("[options]"));
        assert!(text.contains("format_string"));
    }

    #[test]
    fn test_garbage_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[options\nformat_string = ").unwrap();
        assert_eq!(SettingsStore::new(path).load(), Settings::default());
    }

    #[test]
    fn test_missing_key_gives_default_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[options]\n").unwrap();
        let settings = SettingsStore::new(path).load();
        assert_eq!(settings.options.format_string, DEFAULT_FORMAT_STRING);
    }

    #[test]
    fn test_invalid_template_falls_back() {
        let mut settings = Settings::default();
        settings.options.format_string = "{song}".to_string();
        assert_eq!(settings.template(), FormatTemplate::default());
    }

    #[test]
    fn test_locate_prefers_env() {
        let _lock = env_lock();
        let old = env::var_os(SETTINGS_PATH_ENV);
        env::set_var(SETTINGS_PATH_ENV, "/tmp/spotify-menubar-test.toml");

        let store = SettingsStore::locate().unwrap();
        assert_eq!(store.path(), Path::new("/tmp/spotify-menubar-test.toml"));

        match old {
            Some(v) => env::set_var(SETTINGS_PATH_ENV, v),
            None => env::remove_var(SETTINGS_PATH_ENV),
        }
    }
}
