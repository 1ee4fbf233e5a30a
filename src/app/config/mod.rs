// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[gallery]` - Image folder override
//! - `[camera]` - Capture backend, device and format
//! - `[player]` - Volume, mute and video autoplay
//! - `[tools]` - Ping target and subprocess timeouts
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI flag or `ULTIMATE_GUI_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use ultimate_gui::config;
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Gallery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GalleryConfig {
    /// Folder scanned by the gallery and written to by photo capture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<PathBuf>,
}

/// Camera capture settings.
///
/// `format` names an FFmpeg input device (`v4l2`, `dshow`, `avfoundation`)
/// and `device` the URL handed to it. Platform defaults apply when unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,

    #[serde(
        default = "default_camera_framerate",
        skip_serializing_if = "Option::is_none"
    )]
    pub framerate: Option<u32>,

    /// Requested capture size, e.g. `"640x480"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_size: Option<String>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            format: None,
            device: None,
            framerate: default_camera_framerate(),
            video_size: None,
        }
    }
}

/// Audio and video playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Playback volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,

    /// Start videos as soon as they are loaded.
    #[serde(default = "default_autoplay", skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            muted: Some(false),
            autoplay: default_autoplay(),
        }
    }
}

/// Tools page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolsConfig {
    #[serde(default = "default_ping_host", skip_serializing_if = "Option::is_none")]
    pub ping_host: Option<String>,

    #[serde(
        default = "default_ping_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub ping_timeout_secs: Option<u64>,

    #[serde(
        default = "default_ip_config_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub ip_config_timeout_secs: Option<u64>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ping_host: default_ping_host(),
            ping_timeout_secs: default_ping_timeout_secs(),
            ip_config_timeout_secs: default_ip_config_timeout_secs(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Config {
    /// Effective volume, clamped into the supported range.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.player
            .volume
            .unwrap_or(DEFAULT_VOLUME)
            .clamp(MIN_VOLUME, MAX_VOLUME)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_camera_framerate() -> Option<u32> {
    Some(DEFAULT_CAMERA_FRAMERATE)
}

fn default_volume() -> Option<f32> {
    Some(DEFAULT_VOLUME)
}

fn default_autoplay() -> Option<bool> {
    Some(true)
}

fn default_ping_host() -> Option<String> {
    Some(DEFAULT_PING_HOST.to_string())
}

fn default_ping_timeout_secs() -> Option<u64> {
    Some(DEFAULT_PING_TIMEOUT_SECS)
}

fn default_ip_config_timeout_secs() -> Option<u64> {
    Some(DEFAULT_IP_CONFIG_TIMEOUT_SECS)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "failed to load settings");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            gallery: GalleryConfig {
                folder: Some(PathBuf::from("/srv/photos")),
            },
            camera: CameraConfig {
                format: Some("v4l2".to_string()),
                device: Some("/dev/video2".to_string()),
                framerate: Some(15),
                video_size: Some("1280x720".to_string()),
            },
            player: PlayerConfig {
                volume: Some(0.5),
                muted: Some(true),
                autoplay: Some(false),
            },
            tools: ToolsConfig::default(),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.theme_mode, ThemeMode::System);
        assert_eq!(config.gallery.folder, None);
        assert_eq!(config.camera.framerate, Some(DEFAULT_CAMERA_FRAMERATE));
        assert_eq!(config.player.volume, Some(DEFAULT_VOLUME));
        assert_eq!(config.player.autoplay, Some(true));
        assert_eq!(config.tools.ping_host.as_deref(), Some(DEFAULT_PING_HOST));
        assert_eq!(
            config.tools.ping_timeout_secs,
            Some(DEFAULT_PING_TIMEOUT_SECS)
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[general]\nlanguage = \"fr\"\n").expect("parse");
        assert_eq!(config.general.language.as_deref(), Some("fr"));
        assert_eq!(config.player, PlayerConfig::default());
        assert_eq!(config.tools, ToolsConfig::default());
    }

    #[test]
    fn theme_mode_is_case_insensitive() {
        let config: Config = toml::from_str("[general]\ntheme_mode = \"DARK\"\n").expect("parse");
        assert_eq!(config.general.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn unknown_theme_mode_is_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn volume_is_clamped() {
        let config = Config {
            player: PlayerConfig {
                volume: Some(3.0),
                ..PlayerConfig::default()
            },
            ..Config::default()
        };
        assert_eq!(config.volume(), MAX_VOLUME);
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let config = Config {
            general: GeneralConfig {
                language: Some("en-US".to_string()),
                theme_mode: ThemeMode::Dark,
            },
            ..Config::default()
        };

        save_with_override(&config, Some(base_dir.clone())).expect("save");
        let (loaded, warning) = load_with_override(Some(base_dir));

        assert!(warning.is_none());
        assert_eq!(loaded.general, config.general);
    }

    #[test]
    fn corrupt_file_yields_defaults_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[general\n").expect("write");

        let (loaded, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(loaded, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn missing_file_yields_defaults_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (loaded, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(loaded, Config::default());
        assert!(warning.is_none());
    }
}
