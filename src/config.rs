//! Configuration file handling for jetcam.
//!
//! Loads configuration from `~/.config/jetcam/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::camera::{CameraSettings, CameraSource, CaptureApi, Resolution};

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
}

/// The `[camera]` table. Missing keys fall back to [`CameraSettings::default`].
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    pub device: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<u32>,
    pub api: Option<CaptureApi>,
    pub source: Option<CameraSource>,
    pub output_width: Option<u32>,
    pub output_height: Option<u32>,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let config = Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Camera settings with file values layered over the defaults.
    pub fn camera_settings(&self) -> CameraSettings {
        let defaults = CameraSettings::default();
        let c = &self.camera;
        CameraSettings {
            capture_device: c.device.unwrap_or(defaults.capture_device),
            capture_resolution: Resolution::new(
                c.width.unwrap_or(defaults.capture_resolution.width),
                c.height.unwrap_or(defaults.capture_resolution.height),
            ),
            capture_fps: c.fps.unwrap_or(defaults.capture_fps),
            capture_api_pref: c.api.unwrap_or(defaults.capture_api_pref),
            source: c.source.unwrap_or(defaults.source),
            output: Resolution::new(
                c.output_width.unwrap_or(defaults.output.width),
                c.output_height.unwrap_or(defaults.output.height),
            ),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("jetcam").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/jetcam/config.toml")
        })
}
