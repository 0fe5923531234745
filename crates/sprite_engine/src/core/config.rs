//! Engine configuration
//!
//! TOML-backed configuration for the parts of the engine the host wires up
//! at startup: window dimensions handed to the camera and viewport, the
//! clear color, the asset root, and the fixed physics step.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error while reading or writing the config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed as TOML
    #[error("Parse error: {0}")]
    Parse(String),

    /// Config could not be serialized to TOML
    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Window settings handed to the host's windowing layer
#[derive(Debug, Clone, Serialize, Deserialize)]
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
            title: "Sprite Engine".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Clear color as `[r, g, b, a]` normalized floats
    pub clear_color: [f32; 4],
    /// Fixed physics step in seconds
    pub fixed_timestep: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.3, 1.0],
            fixed_timestep: 1.0 / 60.0,
        }
    }
}

/// Asset loading settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Root directory for asset resolution (`{root}/sprites`, `{root}/shaders`)
    pub root: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self { root: PathBuf::from("assets") }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Rendering settings
    pub rendering: RenderingConfig,
    /// Asset loading settings
    pub assets: AssetConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path.as_ref(), contents)?;
        Ok(())
    }
}
