//! User settings for the gallery window and image loading
//!
//! Settings live in an optional JSON file:
//! - Linux: ~/.config/picture-gallery/settings.json
//! - macOS: ~/Library/Application Support/picture-gallery/settings.json
//! - Windows: %APPDATA%\picture-gallery\settings.json
//!
//! Every field has a default, so a partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Height of the image area of each card, in logical pixels
    pub card_image_height: f32,
    /// Width in pixels that fetched images are cropped to
    pub image_width: u32,
    /// Height in pixels that fetched images are cropped to
    pub image_height: u32,
    /// Whole-request timeout for image downloads
    pub fetch_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Keep downloaded image bytes in the user cache directory
    pub disk_cache: bool,
    pub dark_theme: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            card_image_height: 200.0,
            image_width: 400,
            image_height: 200,
            fetch_timeout_secs: 30,
            connect_timeout_secs: 10,
            disk_cache: true,
            dark_theme: true,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read settings from a file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Settings::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from the default location, falling back to defaults on any error
    pub fn load() -> Self {
        let Some(path) = settings_path() else {
            return Settings::default();
        };

        match Settings::load_from(&path) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "settings loaded");
                settings
            }
            Err(e) => {
                tracing::warn!(error = %e, "using default settings");
                Settings::default()
            }
        }
    }
}

/// Get the path where the settings file is expected
pub fn settings_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
    path.push("picture-gallery");
    path.push("settings.json");
    Some(path)
}
