//! # Engine Configuration
//!
//! Settings for the main loop and its subsystems. Everything here can be
//! loaded from and saved to TOML or RON through the [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Window**: title and size handed to the render backend
//! - **Resources**: data directory and default font
//! - **Loop**: log level, frame rate target and FPS counter window

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ecs::components::FPS_UPDATE_INTERVAL;

pub use crate::config::{Config, ConfigError};

/// Window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Programming 4 assignment".to_string(),
            width: 1024,
            height: 576,
        }
    }
}

/// Font used by modules that are not given one explicitly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Path relative to the data directory
    pub path: PathBuf,
    /// Point size
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Lingua.otf"),
            size: 36,
        }
    }
}

/// # Engine Configuration
///
/// Core engine behavior: logging, frame pacing and resource locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Directory resources are loaded from
    pub data_path: PathBuf,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Target FPS for frame rate limiting
    pub target_fps: Option<u32>,
    /// Seconds between FPS counter refreshes
    pub fps_interval: f32,
    /// Default font
    pub default_font: FontConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            window: WindowConfig::default(),
            data_path: PathBuf::from("Data"),
            log_level: "info".to_string(),
            target_fps: None, // Unlimited by default
            fps_interval: FPS_UPDATE_INTERVAL,
            default_font: FontConfig::default(),
        }
    }

    /// Set window title and size
    pub fn with_window(mut self, title: impl Into<String>, width: u32, height: u32) -> Self {
        self.window = WindowConfig {
            title: title.into(),
            width,
            height,
        };
        self
    }

    /// Set the data directory
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    /// Set the FPS counter refresh interval
    pub fn with_fps_interval(mut self, seconds: f32) -> Self {
        self.fps_interval = seconds;
        self
    }

    /// Set the default font
    pub fn with_default_font(mut self, path: impl Into<PathBuf>, size: u32) -> Self {
        self.default_font = FontConfig {
            path: path.into(),
            size,
        };
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            )));
        }
        if self.target_fps == Some(0) {
            return Err(ConfigError::Invalid("target_fps must be positive".to_string()));
        }
        if !(self.fps_interval > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fps_interval must be positive, got {}",
                self.fps_interval
            )));
        }
        if self.default_font.size == 0 {
            return Err(ConfigError::Invalid("default font size must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}
