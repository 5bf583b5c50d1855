//! Configuration system for the Ridgeline terrain renderer.
//!
//! Runtime-tunable settings that persist to disk as RON files, with
//! forward/backward compatible serialization: missing sections fall back
//! to defaults and unknown fields are ignored.

mod config;
mod error;

pub use config::{CameraSettings, Config, DebugSettings, TerrainSettings};
pub use error::ConfigError;
