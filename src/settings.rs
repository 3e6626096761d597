//! Game settings and preferences
//!
//! Persisted as JSON next to the binary. Every field has a default, so a
//! partial or outdated file still loads.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CAMERA_DEFAULT_DISTANCE, CAMERA_DEFAULT_PITCH};
use crate::tuning::Difficulty;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Render fidelity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Flat-shaded boxes, no external assets
    #[default]
    Prototype,
    /// Textured ground and the character model, fetched on demand
    Full,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Prototype => "prototype",
            RenderMode::Full => "full",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "prototype" | "proto" => Some(RenderMode::Prototype),
            "full" => Some(RenderMode::Full),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            RenderMode::Prototype => RenderMode::Full,
            RenderMode::Full => RenderMode::Prototype,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: RenderMode,
    pub difficulty: Difficulty,
    /// Level to start on (wrapped into the catalog)
    pub start_level: i64,

    // === Camera ===
    pub camera_yaw: f32,
    pub camera_pitch: f32,
    pub camera_distance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Prototype,
            difficulty: Difficulty::Normal,
            start_level: 0,

            camera_yaw: 0.0,
            camera_pitch: CAMERA_DEFAULT_PITCH,
            camera_distance: CAMERA_DEFAULT_DISTANCE,
        }
    }
}

impl Settings {
    /// Read settings from `path`
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
