//! Persisted render settings
//!
//! Settings are a single JSON file. Missing fields take their defaults so
//! older or hand-written files keep loading.

use crate::render::RenderConfig;
use crate::waveform::DEFAULT_BAR_COUNT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Settings-related errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Number of bars in the envelope
    pub bar_count: usize,
    pub render: RenderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bar_count: DEFAULT_BAR_COUNT,
            render: RenderConfig::default(),
        }
    }
}

impl Settings {
    /// Reject values no renderer can use. Colors are not checked here since
    /// unparseable colors fall back at render time.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.bar_count == 0 {
            return Err(SettingsError::Invalid("barCount must be at least 1".to_string()));
        }
        if self.render.width == 0 || self.render.height == 0 {
            return Err(SettingsError::Invalid(format!(
                "canvas size {}x{} is empty",
                self.render.width, self.render.height
            )));
        }
        Ok(())
    }
}

/// Read settings from a JSON file
pub fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)?;
    settings.validate()?;

    tracing::debug!("Loaded settings from {:?}", path);

    Ok(settings)
}

/// Write settings to a JSON file, creating parent directories as needed
pub fn write_settings(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content)?;

    tracing::debug!("Saved settings to {:?}", path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.bar_count = 400;
        settings.render.width = 900;
        settings.render.wave_color = "#4facfe".to_string();

        write_settings(&settings, &path).unwrap();
        let loaded = read_settings(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "render": { "height": 120 } }"#).unwrap();

        let loaded = read_settings(&path).unwrap();

        assert_eq!(loaded.bar_count, DEFAULT_BAR_COUNT);
        assert_eq!(loaded.render.height, 120);
        assert_eq!(loaded.render.width, 1200);
        assert_eq!(loaded.render.wave_color, "#ff5500");
    }

    #[test]
    fn test_zero_bar_count_is_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "barCount": 0 }"#).unwrap();

        assert!(matches!(read_settings(&path), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_settings(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
