//! Tactile configuration system
//!
//! This crate provides centralized configuration for the animated cursor,
//! loading settings from `tactile.toml` with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "tactile.toml";

/// Errors that can occur while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TactileConfig {
    /// Cursor behaviour switches
    pub cursor: CursorConfig,
    /// Gesture recognition tuning
    pub gesture: GestureConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

/// Cursor behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Enable rotate-while-pressed gestures (default: true)
    pub rotate: bool,
}

/// Gesture recognition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Distance in pixels the pointer must travel from the press point before
    /// a press turns into a rotation
    pub dead_zone_px: f64,
    /// Angular offset between the drag axis and the cursor's grab point, in degrees
    pub grab_offset_degrees: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level for the fmt subscriber (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self { rotate: true }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            dead_zone_px: 30.0,
            grab_offset_degrees: 24.3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl TactileConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the default location (tactile.toml in the current directory)
    /// or return default configuration if the file doesn't exist or is invalid
    pub fn load_or_default() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("TACTILE_ROTATE") {
            self.cursor.rotate = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("TACTILE_DEAD_ZONE") {
            if let Ok(px) = val.parse::<f64>() {
                self.gesture.dead_zone_px = px;
            }
        }
        if let Ok(val) = std::env::var("TACTILE_GRAB_OFFSET") {
            if let Ok(deg) = val.parse::<f64>() {
                self.gesture.grab_offset_degrees = deg;
            }
        }
        if let Ok(level) = std::env::var("TACTILE_LOG") {
            self.logging.level = level;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from tactile.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
