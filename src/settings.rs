//! Settings management for the launcher
//!
//! Handles loading and saving user settings to a JSON file.
//! Uses separate directories for production and test builds:
//! - Linux/macOS Production: ~/.config/rmg/settings.json
//! - Linux/macOS Test/Debug: ~/.config/rmg-test/settings.json
//! - Windows Production: %APPDATA%\rmg\settings.json
//! - Windows Test/Debug: %APPDATA%\rmg-test\settings.json
//! - Portable installs: Config/settings.json next to the executable

use crate::error::{BootError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";
pub const PORTABLE_CONFIG_DIR: &str = "Config";

/// Main window geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 960,
            height: 720,
            maximized: false,
        }
    }
}

/// Default core locations. Empty means "use the built-in location";
/// command-line overrides take precedence over anything set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(rename = "libraryPath", default)]
    pub library: String,
    #[serde(rename = "corePath", default)]
    pub core: String,
    #[serde(rename = "pluginPath", default)]
    pub plugin: String,
    #[serde(rename = "sharedDataPath", default)]
    pub shared_data: String,
}

/// Settings structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub paths: PathSettings,
}

/// Directory holding the settings file for this build profile.
pub fn settings_dir(portable: bool) -> Result<PathBuf> {
    if portable {
        // The working directory has already been pinned to the executable
        return Ok(PathBuf::from(PORTABLE_CONFIG_DIR));
    }

    #[cfg(production)]
    let app_name = "rmg";

    #[cfg(not(production))]
    let app_name = "rmg-test";

    let proj_dirs = ProjectDirs::from("", "", app_name).ok_or(BootError::NoDirectory("config"))?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

pub fn settings_path(portable: bool) -> Result<PathBuf> {
    Ok(settings_dir(portable)?.join(SETTINGS_FILE))
}

/// Load settings from `path`, creating the file with defaults if it is missing.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        let default_settings = Settings::default();
        save_settings_to(path, &default_settings)?;
        return Ok(default_settings);
    }

    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load the settings for this install, falling back to defaults on any error.
pub fn load_settings(portable: bool) -> Settings {
    let loaded = settings_path(portable).and_then(|path| {
        log::debug!("[SETTINGS] Loading {}", path.display());
        load_settings_from(&path)
    });

    loaded.unwrap_or_else(|e| {
        log::warn!("[SETTINGS] Failed to load settings, using defaults: {}", e);
        Settings::default()
    })
}
