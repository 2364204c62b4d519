/// Studio settings
///
/// Stored as JSON in the platform config directory:
/// - Linux: ~/.config/docuarq-studio/config.json
/// - macOS: ~/Library/Application Support/docuarq-studio/config.json
/// - Windows: %APPDATA%\docuarq-studio\config.json
///
/// Every field has a default, so a partial (or missing) file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ai::Voice;

pub const APP_DIR: &str = "docuarq-studio";
const FILENAME: &str = "config.json";

/// Environment variables checked for the API key, in order
const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Gemini API key. Falls back to GEMINI_API_KEY, then API_KEY.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
    /// Vision model used to write proposal narratives
    pub description_model: String,
    /// Speech model used for narration
    pub speech_model: String,
    pub voice: Voice,
    pub studio: StudioContact,
    /// Where the catalog and imported media live (defaults to the user data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Contact details shown on the presentation screen
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StudioContact {
    pub phone: String,
    pub whatsapp: String,
    pub location: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            description_model: "gemini-3-flash-preview".to_string(),
            speech_model: "gemini-2.5-flash-preview-tts".to_string(),
            voice: Voice::default(),
            studio: StudioContact::default(),
            data_dir: None,
        }
    }
}

impl Default for StudioContact {
    fn default() -> Self {
        Self {
            phone: "0985458261".to_string(),
            whatsapp: "593985458261".to_string(),
            location: "Quito, EC".to_string(),
        }
    }
}

impl Settings {
    /// Path of the settings file, if the platform has a config directory
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILENAME))
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&contents).map_err(|e| format!("Invalid {}: {e}", path.display()))
    }

    /// Load the settings file, falling back to defaults when it is
    /// missing or unreadable
    pub fn load_or_default() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("⚙️  Settings loaded from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Resolve the API key from the settings file or the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        if let Some(key) = &self.gemini_api_key {
            if !key.trim().is_empty() {
                return Some(key.trim().to_string());
            }
        }
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| env(name))
            .find(|key| !key.trim().is_empty())
    }

    /// Root directory for the catalog and imported images
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }

    /// Directory for thumbnails and other regenerable files
    pub fn cache_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.join("cache"),
            None => dirs::cache_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "voice": "Zephyr", "studio": { "location": "Cuenca, EC" } }"#)
            .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.voice, Voice::Zephyr);
        assert_eq!(settings.studio.location, "Cuenca, EC");
        assert_eq!(settings.studio.phone, StudioContact::default().phone);
        assert_eq!(settings.description_model, "gemini-3-flash-preview");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_api_key_prefers_settings_then_env_order() {
        let env = |name: &str| match name {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some("from-env".to_string()),
            _ => None,
        };

        let mut settings = Settings::default();
        assert_eq!(settings.resolve_api_key_with(env).as_deref(), Some("from-env"));

        settings.gemini_api_key = Some("from-file".to_string());
        assert_eq!(settings.resolve_api_key_with(env).as_deref(), Some("from-file"));

        assert_eq!(Settings::default().resolve_api_key_with(|_| None), None);
    }

    #[test]
    fn test_data_dir_override() {
        let settings = Settings {
            data_dir: Some(PathBuf::from("/tmp/studio")),
            ..Settings::default()
        };
        assert_eq!(settings.data_dir(), PathBuf::from("/tmp/studio"));
        assert_eq!(settings.cache_dir(), PathBuf::from("/tmp/studio/cache"));
    }
}
