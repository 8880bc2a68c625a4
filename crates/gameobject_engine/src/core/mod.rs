//! # Core Engine Module
//!
//! Engine-wide configuration shared by the main loop and its subsystems.

pub mod config;

pub use config::{Config, ConfigError, EngineConfig, FontConfig, WindowConfig};
