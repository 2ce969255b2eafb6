//! Sandbox configuration
//!
//! Loaded from a TOML file; every section and field is optional and falls back
//! to the defaults below.
//!
//! # File format (sandbox.toml)
//!
//! ```toml
//! [window]
//! width = 1280.0            # logical size in DIPs
//! height = 720.0
//! dpi = 96.0
//! native_orientation = "landscape"
//! orientation = "landscape"
//!
//! [graphics]
//! sync_interval = 1
//! buffer_count = 2
//! debug_layer = false
//! headless_frame_interval_ms = 16
//!
//! [timing]
//! fixed_time_step = false
//! target_elapsed_seconds = 0.016666666666666666
//!
//! [assets]
//! root = "assets"
//!
//! [logging]
//! level = "info"            # trace, debug, info, warn, error
//!
//! [scene]
//! kind = "colored_cube"     # or "lit_cube"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::device_resources::DisplayOrientation;
use crate::error::{Error, Result};
use crate::log::LogSeverity;

/// Complete sandbox configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SandboxConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub graphics: GraphicsConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub scene: SceneConfig,
}

/// Host window parameters as reported by the shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Logical width in device-independent pixels
    #[serde(default = "default_width")]
    pub width: f32,

    /// Logical height in device-independent pixels
    #[serde(default = "default_height")]
    pub height: f32,

    #[serde(default = "default_dpi")]
    pub dpi: f32,

    #[serde(default = "default_orientation")]
    pub native_orientation: DisplayOrientation,

    #[serde(default = "default_orientation")]
    pub orientation: DisplayOrientation,
}

/// Swap chain and device creation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// Vertical blanks to wait per present (0 = immediate)
    #[serde(default = "default_sync_interval")]
    pub sync_interval: u32,

    /// Swap chain back buffer count
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,

    /// Request the backend's validation layer
    #[serde(default)]
    pub debug_layer: bool,

    /// Simulated vertical blank for the headless backend, 0 disables pacing
    #[serde(default = "default_headless_frame_interval_ms")]
    pub headless_frame_interval_ms: u64,
}

/// Update timer parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default)]
    pub fixed_time_step: bool,

    #[serde(default = "default_target_elapsed_seconds")]
    pub target_elapsed_seconds: f64,
}

/// Asset lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding compiled shaders and textures
    #[serde(default = "default_assets_root")]
    pub root: PathBuf,
}

/// Logging parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: LogSeverity,
}

/// Initial demo scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_scene_kind")]
    pub kind: SceneKind,
}

/// Demo renderers selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    ColoredCube,
    LitCube,
}

// Default value functions
fn default_width() -> f32 { 1280.0 }
fn default_height() -> f32 { 720.0 }
fn default_dpi() -> f32 { 96.0 }
fn default_orientation() -> DisplayOrientation { DisplayOrientation::Landscape }
fn default_sync_interval() -> u32 { 1 }
fn default_buffer_count() -> u32 { 2 }
fn default_headless_frame_interval_ms() -> u64 { 16 }
fn default_target_elapsed_seconds() -> f64 { 1.0 / 60.0 }
fn default_assets_root() -> PathBuf { PathBuf::from("assets") }
fn default_log_level() -> LogSeverity { LogSeverity::Info }
fn default_scene_kind() -> SceneKind { SceneKind::ColoredCube }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            dpi: default_dpi(),
            native_orientation: default_orientation(),
            orientation: default_orientation(),
        }
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            sync_interval: default_sync_interval(),
            buffer_count: default_buffer_count(),
            debug_layer: false,
            headless_frame_interval_ms: default_headless_frame_interval_ms(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_time_step: false,
            target_elapsed_seconds: default_target_elapsed_seconds(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self { root: default_assets_root() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { kind: default_scene_kind() }
    }
}

impl SandboxConfig {
    /// Parse a configuration from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SandboxConfig = toml::from_str(contents)
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the TOML file
    ///
    /// # Errors
    ///
    /// `Error::FileLoad` when the file cannot be read, `Error::Config` when it
    /// does not parse or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::file_load(path, e))?;
        Self::from_toml_str(&contents)
    }

    /// Load a configuration file, falling back to defaults if it is missing
    ///
    /// A file that exists but is invalid is still an error.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            crate::engine_info!(
                "sandbox::Config",
                "No configuration at '{}', using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Write the configuration as pretty TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), contents)
            .map_err(|e| Error::file_load(path.as_ref(), e))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &str, reason: &str) -> Result<()> {
            Err(Error::Config(format!("{}: {}", field, reason)))
        }

        if !(self.window.width > 0.0) || !(self.window.height > 0.0) {
            return invalid("window", "logical size must be positive");
        }
        if !(self.window.dpi > 0.0) {
            return invalid("window.dpi", "must be positive");
        }
        if self.graphics.sync_interval > 4 {
            return invalid("graphics.sync_interval", "must be between 0 and 4");
        }
        if self.graphics.buffer_count < 2 {
            return invalid("graphics.buffer_count", "flip-model swap chains need at least 2 buffers");
        }
        let target = self.timing.target_elapsed_seconds;
        if !target.is_finite() || target <= 0.0 {
            return invalid("timing.target_elapsed_seconds", "must be a positive number of seconds");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
