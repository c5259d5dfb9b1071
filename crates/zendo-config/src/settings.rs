//! Settings file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use zendo_engine::Mode;

use crate::error::ConfigError;
use crate::validation::validate_settings;

/// Engine settings, stored as TOML.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 48000
/// seed = 7
/// mode = "chat"
/// music = true
/// master_ceiling = 0.8
///
/// [delay]
/// feedback = 0.4
///
/// [glass]
/// interval_min_secs = 3.0
/// interval_max_secs = 7.0
/// ```
///
/// Every field has a default, so an empty file is a valid settings file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Render and playback sample rate in Hz.
    pub sample_rate: u32,

    /// Seed for all engine randomness. `None` asks the caller to pick one
    /// (the CLI uses the current time), so two launches differ.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,

    /// Mode the engine starts in.
    pub mode: Mode,

    /// Whether music starts enabled.
    pub music: bool,

    /// Master gain ceiling when music is on, in (0, 1].
    pub master_ceiling: f32,

    /// Resonant delay tuning.
    pub delay: DelaySettings,

    /// Glass-note scheduler tuning.
    pub glass: GlassSettings,
}

/// Tuning for the temple bed's resonant delay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DelaySettings {
    /// Feedback gain of the loop, in [0, 1).
    pub feedback: f32,
}

/// Tuning for the glass-note scheduler.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlassSettings {
    /// Shortest gap between notes, in seconds.
    pub interval_min_secs: f32,
    /// Longest gap between notes, in seconds.
    pub interval_max_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            seed: None,
            mode: Mode::default(),
            music: true,
            master_ceiling: 0.8,
            delay: DelaySettings::default(),
            glass: GlassSettings::default(),
        }
    }
}

impl Default for DelaySettings {
    fn default() -> Self {
        Self { feedback: 0.4 }
    }
}

impl Default for GlassSettings {
    fn default() -> Self {
        Self {
            interval_min_secs: 3.0,
            interval_max_secs: 7.0,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(toml_str)?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Save the settings to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.sample_rate, 48_000);
        assert_eq!(settings.mode, Mode::Chat);
        assert!(settings.music);
    }

    #[test]
    fn parses_a_full_file() {
        let settings = Settings::from_toml(
            r#"
            sample_rate = 44100
            seed = 7
            mode = "breathe"
            music = false
            master_ceiling = 0.6

            [delay]
            feedback = 0.3

            [glass]
            interval_min_secs = 2.0
            interval_max_secs = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.sample_rate, 44_100);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.mode, Mode::Breathe);
        assert!(!settings.music);
        assert!((settings.master_ceiling - 0.6).abs() < 1e-6);
        assert!((settings.delay.feedback - 0.3).abs() < 1e-6);
        assert!((settings.glass.interval_min_secs - 2.0).abs() < 1e-6);
        assert!((settings.glass.interval_max_secs - 5.0).abs() < 1e-6);
    }

    #[test]
    fn load_rejects_invalid_values() {
        let err = Settings::from_toml("sample_rate = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = Settings::from_toml("[delay]\nfeedback = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn unknown_mode_fails_to_parse() {
        let err = Settings::from_toml(r#"mode = "sleep""#).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.seed = Some(99);
        settings.mode = Mode::Focus;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/settings.toml");
        Settings::default().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn load_missing_file_is_a_read_error() {
        let err = Settings::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
