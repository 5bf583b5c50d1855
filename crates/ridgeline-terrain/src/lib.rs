//! Crack-free geomipmapped terrain: patch topology over a regular-grid
//! heightfield, per-frame distance-based LOD selection, and border-aware
//! index stitching feeding a single shared vertex buffer.

mod config;
mod debug_viz;
mod error;
mod mesh;
mod patch;
mod stitch;
mod terrain;
mod vertex;

pub use config::TerrainConfig;
pub use debug_viz::{
    DebugLine, LOD_PALETTE, box_edges, changed_patch_overlay, lod_color, patch_overlay,
};
pub use error::TerrainError;
pub use mesh::{AlwaysVisible, CullingVolume, TerrainMesh};
pub use patch::{Border, Patch, PatchGrid};
pub use stitch::build_indices;
pub use terrain::{CameraPose, Terrain, TerrainStats};
pub use vertex::{FLOATS_PER_VERTEX, TerrainVertex};
