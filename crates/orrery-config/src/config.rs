//! Configuration sections with defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub input: InputConfig,
    pub scene: SceneConfig,
    pub assets: AssetConfig,
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in borderless fullscreen.
    pub fullscreen: bool,
    /// Present with `PresentMode::Fifo` when true.
    pub vsync: bool,
    /// Prefix used for the window title; the HUD is appended to it.
    pub title: String,
}

/// Camera projection and mesh tessellation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    /// Far plane. Must enclose the starfield cube to see all of it.
    pub far: f32,
    /// Segment count of the close-up Earth globe and its cloud shell.
    pub globe_segments: u32,
    /// Segment count of the bodies in the solar-system view.
    pub body_segments: u32,
    /// Background clear color as linear RGB.
    pub clear_color: [f64; 3],
}

/// Pointer sensitivities and key bindings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of target rotation per pixel of primary-button drag.
    pub rotate_sensitivity: f32,
    /// Pan distance per pixel, scaled by the distance to the look-at target.
    pub pan_sensitivity: f32,
    /// Camera travel per unit of wheel delta.
    pub wheel_sensitivity: f32,
    /// Maximum pointer travel in pixels for a press/release to count as a click.
    pub click_slop_px: f32,
    /// Keybinding overrides (command name -> key name).
    pub keybindings: HashMap<String, String>,
}

/// Procedural scene content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub star_count: u32,
    /// Half-width of the cube the starfield is sampled in.
    pub star_half_extent: f32,
    pub star_size: f32,
    /// Seed for star positions and initial orbit angles. Random when unset.
    pub seed: Option<u64>,
}

/// Where texture files are read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding the body texture images. Relative paths resolve
    /// against the working directory.
    pub texture_dir: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter override (e.g., "debug", "info,orrery_view=trace").
    pub log_level: String,
    /// Append frames per second to the window title.
    pub show_fps: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
            globe_segments: 64,
            body_segments: 32,
            clear_color: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.005,
            pan_sensitivity: 0.001,
            wheel_sensitivity: 0.001,
            click_slop_px: 4.0,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: 10_000,
            star_half_extent: 1000.0,
            star_size: 0.7,
            seed: None,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_fps: false,
        }
    }
}

impl Config {
    /// Load `config.ron` from `config_dir`, writing a default one if absent.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save as `config.ron` inside `config_dir`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}
