//! Layered settings for the interval timer.
//!
//! Values are resolved in this order, later layers winning:
//! 1. Built-in defaults (`IntervalConfig::default()`, sound on)
//! 2. The JSON settings file, if present
//! 3. Command-line overrides
//!
//! The merged interval configuration is validated once, before any engine
//! is built.

mod error;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::sound::{CueSet, SoundSource};
use crate::types::IntervalConfig;

pub use error::SettingsError;

/// Directory name under the platform config dir.
const APP_DIR_NAME: &str = "pomodoro-interval";

/// Settings file name.
const SETTINGS_FILE_NAME: &str = "config.json";

// ============================================================================
// SettingsFile
// ============================================================================

/// On-disk settings. Every field is optional.
///
/// # Example
///
/// ```
/// use pomodoro_interval::config::SettingsFile;
///
/// let file: SettingsFile = serde_json::from_str(r#"{ "work_seconds": 3000 }"#).unwrap();
/// assert_eq!(file.work_seconds, Some(3000));
/// assert_eq!(file.sound, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_rest_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_rest_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles_before_long_rest: Option<u32>,
    /// Whether phase cues are played
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<bool>,
    /// Audio file played when work starts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_cue: Option<PathBuf>,
    /// Audio file played when a rest starts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_cue: Option<PathBuf>,
}

/// Returns `<config_dir>/pomodoro-interval/config.json`, if the platform has
/// a config directory.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// Reads and parses a settings file.
///
/// # Errors
///
/// Returns `SettingsError::NotFound`, `Read` or `Parse`.
pub fn read_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    if !path.exists() {
        return Err(SettingsError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the settings file.
///
/// An explicit path must exist. Without one, the default location is tried
/// and a missing file yields empty settings.
///
/// # Errors
///
/// Propagates errors from [`read_settings_file`].
pub fn load_settings_file(explicit: Option<&Path>) -> Result<SettingsFile, SettingsError> {
    if let Some(path) = explicit {
        debug!("Loading settings from {}", path.display());
        return read_settings_file(path);
    }

    match default_settings_path() {
        Some(path) if path.exists() => {
            debug!("Loading settings from {}", path.display());
            read_settings_file(&path)
        }
        _ => Ok(SettingsFile::default()),
    }
}

// ============================================================================
// Overrides
// ============================================================================

/// Values supplied on the command line, already converted to seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub work_seconds: Option<u32>,
    pub short_rest_seconds: Option<u32>,
    pub long_rest_seconds: Option<u32>,
    pub cycles_before_long_rest: Option<u32>,
    /// `Some(false)` when sound was switched off on the command line
    pub sound: Option<bool>,
}

// ============================================================================
// Settings
// ============================================================================

/// Sound-related settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoundSettings {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_cue: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_cue: Option<PathBuf>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            work_cue: None,
            rest_cue: None,
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub interval: IntervalConfig,
    pub sound: SoundSettings,
}

impl Settings {
    /// Merges defaults, the settings file and overrides, then validates.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Invalid` if the merged interval configuration
    /// is rejected.
    pub fn resolve(file: SettingsFile, overrides: &Overrides) -> Result<Self, SettingsError> {
        let defaults = IntervalConfig::default();

        let interval = IntervalConfig {
            work_seconds: overrides
                .work_seconds
                .or(file.work_seconds)
                .unwrap_or(defaults.work_seconds),
            short_rest_seconds: overrides
                .short_rest_seconds
                .or(file.short_rest_seconds)
                .unwrap_or(defaults.short_rest_seconds),
            long_rest_seconds: overrides
                .long_rest_seconds
                .or(file.long_rest_seconds)
                .unwrap_or(defaults.long_rest_seconds),
            cycles_before_long_rest: overrides
                .cycles_before_long_rest
                .or(file.cycles_before_long_rest)
                .unwrap_or(defaults.cycles_before_long_rest),
        };
        interval.validate()?;

        let sound = SoundSettings {
            enabled: overrides.sound.or(file.sound).unwrap_or(true),
            work_cue: file.work_cue,
            rest_cue: file.rest_cue,
        };

        Ok(Self { interval, sound })
    }

    /// Loads the settings file and resolves it against `overrides`.
    ///
    /// # Errors
    ///
    /// See [`load_settings_file`] and [`Settings::resolve`].
    pub fn load(explicit: Option<&Path>, overrides: &Overrides) -> Result<Self, SettingsError> {
        let file = load_settings_file(explicit)?;
        Self::resolve(file, overrides)
    }

    /// Builds the cue set, keeping the built-in bell for any cue file that
    /// cannot be used.
    #[must_use]
    pub fn cues(&self) -> CueSet {
        let mut cues = CueSet::default();
        if let Some(source) = cue_from_path(self.sound.work_cue.as_deref()) {
            cues.work_started = source;
        }
        if let Some(source) = cue_from_path(self.sound.rest_cue.as_deref()) {
            cues.rest_started = source;
        }
        cues
    }
}

fn cue_from_path(path: Option<&Path>) -> Option<SoundSource> {
    let path = path?;
    match SoundSource::from_path(path) {
        Ok(source) => Some(source),
        Err(e) => {
            warn!("Ignoring cue file {}: {} ({})", path.display(), e, e.suggestion());
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
