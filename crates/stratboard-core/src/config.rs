//! User settings for transitions and playback.

use crate::animation::Easing;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Longest accepted transition or hold, in milliseconds.
pub const MAX_DURATION_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find config directory")]
    NoConfigDir,
    #[error("Failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

fn default_transition_duration() -> u64 {
    500
}

fn default_hold_time() -> u64 {
    1000
}

/// Persisted settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Length of an animated sequence switch.
    #[serde(rename = "sequenceTransitionDuration", default = "default_transition_duration")]
    pub transition_duration_ms: u64,
    #[serde(rename = "sequenceEasing", default)]
    pub easing: Easing,
    /// Pause on each slot during playback.
    #[serde(rename = "sequenceHoldTime", default = "default_hold_time")]
    pub hold_time_ms: u64,
    /// Show the element inspector overlay.
    #[serde(default)]
    pub debug_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transition_duration_ms: default_transition_duration(),
            easing: Easing::default(),
            hold_time_ms: default_hold_time(),
            debug_overlay: false,
        }
    }
}

impl Settings {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn hold_time(&self) -> Duration {
        Duration::from_millis(self.hold_time_ms)
    }

    /// Clamp durations to [`MAX_DURATION_MS`].
    pub fn validate_and_clamp(&mut self) {
        if self.transition_duration_ms > MAX_DURATION_MS {
            warn!(
                "Transition duration {}ms too long, clamping to {}ms",
                self.transition_duration_ms, MAX_DURATION_MS
            );
            self.transition_duration_ms = MAX_DURATION_MS;
        }
        if self.hold_time_ms > MAX_DURATION_MS {
            warn!(
                "Hold time {}ms too long, clamping to {}ms",
                self.hold_time_ms, MAX_DURATION_MS
            );
            self.hold_time_ms = MAX_DURATION_MS;
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate_and_clamp();
        Ok(settings)
    }

    /// Default settings file, `<config dir>/stratboard/settings.json`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("stratboard").join("settings.json"))
    }

    /// Load from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("Settings file not found, using defaults");
            debug!("Expected settings at: {}", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }
}
