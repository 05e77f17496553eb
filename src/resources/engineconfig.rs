//! Engine configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! max_textures = 512
//!
//! [window]
//! width = 1280
//! height = 720
//! fullscreen = false
//! vsync = true
//! target_fps = 120
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_MAX_TEXTURES: usize = 512;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Engine configuration resource.
///
/// Stores the texture cache capacity and window settings. `max_textures`
/// bounds the number of GPU-resident textures kept by the
/// [`TextureCache`](crate::resources::texturecache::TextureCache); values
/// below 1 are nonsensical and get clamped.
#[derive(Resource, Debug, Clone)]
pub struct EngineConfig {
    /// Texture cache eviction capacity.
    pub max_textures: usize,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            max_textures: DEFAULT_MAX_TEXTURES,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [render] section
        if let Some(max_textures) = config.getuint("render", "max_textures").ok().flatten() {
            self.set_max_textures(max_textures as usize);
        }

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        info!(
            "Loaded config: max_textures={}, {}x{} window, fps={}, vsync={}, fullscreen={}",
            self.max_textures,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [render] section
        config.set("render", "max_textures", Some(self.max_textures.to_string()));

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Set the texture cache capacity, clamping values below 1.
    pub fn set_max_textures(&mut self, max_textures: usize) {
        if max_textures < 1 {
            warn!("max_textures must be at least 1, clamping");
            self.max_textures = 1;
        } else {
            self.max_textures = max_textures;
        }
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = EngineConfig::new();
        assert!(config.max_textures >= 1);
        assert!(config.window_width > 0);
        assert!(config.window_height > 0);
    }

    #[test]
    fn test_max_textures_clamped() {
        let mut config = EngineConfig::new();
        config.set_max_textures(0);
        assert_eq!(config.max_textures, 1);
        config.set_max_textures(64);
        assert_eq!(config.max_textures, 64);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let mut config = EngineConfig::with_path("/nonexistent/config.ini");
        assert!(config.load_from_file().is_err());
        // Defaults survive a failed load.
        assert_eq!(config.max_textures, DEFAULT_MAX_TEXTURES);
    }
}
