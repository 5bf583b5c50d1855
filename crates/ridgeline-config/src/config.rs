//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain geometry settings.
    pub terrain: TerrainSettings,
    /// Camera/LOD-update settings.
    pub camera: CameraSettings,
    /// Debug/development settings.
    pub debug: DebugSettings,
}

/// Terrain geometry configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainSettings {
    /// Heightmap image to load (empty = procedural noise terrain).
    pub heightmap_path: String,
    /// World-space position of the terrain origin corner.
    pub position: [f32; 3],
    /// Per-axis world scale applied to grid coordinates and heights.
    pub scale: [f32; 3],
    /// Vertices per patch edge; a power of two plus one (17, 33, 65...).
    pub patch_size: u32,
    /// Number of LOD levels (level 0 is full detail).
    pub max_lod: u32,
    /// Multiplier applied to sampled heights before world scaling.
    pub height_scale: f32,
    /// Detail texture tiling factor across the whole terrain.
    pub detail_repeat: f32,
}

/// Camera-side thresholds for the LOD recomputation gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraSettings {
    /// Per-axis camera movement (world units) that reopens the LOD gate.
    pub movement_delta: f32,
    /// Camera rotation (degrees) that reopens the LOD gate.
    pub rotation_delta_deg: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugSettings {
    /// Draw per-patch bounding boxes colored by LOD level.
    pub show_patch_boxes: bool,
    /// Enable wireframe rendering.
    pub wireframe_mode: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            heightmap_path: String::new(),
            position: [0.0; 3],
            scale: [1.0; 3],
            patch_size: 17,
            max_lod: 5,
            height_scale: 1.0,
            detail_repeat: 20.0,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_delta: 10.0,
            rotation_delta_deg: 1.0,
        }
    }
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            show_patch_boxes: false,
            wireframe_mode: false,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            tracing::info!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            tracing::info!("created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            tracing::info!("config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
