//! User settings and configuration persistence
//!
//! Defines the `Settings` struct with serde support and handles loading and
//! saving it as JSON under the platform config directory, with graceful
//! fallback to defaults when the file is missing or corrupted.

use crate::error::{Error, Result, ResultExt};
use crate::search::{SearchOptions, DEFAULT_PREVIEW_MAX_LEN};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "quire";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// User-configurable options for the session core.
///
/// Unknown fields in the file are ignored and missing fields take their
/// defaults, so older or newer config files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Search option flags applied when none are given explicitly
    pub default_search: SearchOptions,
    /// Byte budget for result-line previews
    pub preview_max_len: usize,
    /// Whether discarding unsaved changes requires its own confirmation
    /// (when false, declining to save counts as discard)
    pub confirm_before_discard: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_search: SearchOptions::default(),
            preview_max_len: DEFAULT_PREVIEW_MAX_LEN,
            confirm_before_discard: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, clamping out-of-range values to defaults.
    pub fn from_json_sanitized(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if settings.preview_max_len == 0 {
            warn!("preview_max_len of 0 is unusable, falling back to default");
            settings.preview_max_len = DEFAULT_PREVIEW_MAX_LEN;
        }
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paths
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the base config directory cannot be
/// determined (e.g. the HOME environment variable is not set).
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn settings_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load / Save
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from the default location, falling back to defaults when
/// the file is missing, empty, or invalid.
pub fn load_settings() -> Settings {
    load_settings_internal()
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

fn load_settings_internal() -> Result<Settings> {
    let path = settings_path()?;

    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let contents = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents)?;
    info!("Loaded configuration from {}", path.display());
    Ok(settings)
}

/// Save settings to the default location, creating the directory if needed.
pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
    }

    let path = settings_path()?;
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(&path, json).map_err(|e| Error::io(&path, e))?;
    debug!("Saved configuration to {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
