//! Terrain construction and configuration errors.
//!
//! Malformed configurations (grids that don't tile into patches, LOD
//! counts the patch span can't express) are rejected at construction
//! rather than silently under-covering the grid or emitting garbage
//! indices later.

/// Errors raised while constructing or reconfiguring a terrain.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// Patch edges must be a power of two plus one (9, 17, 33, 65, 129).
    #[error("patch size {0} must be a power of two plus one, at least 3")]
    InvalidPatchSize(u32),

    /// World scale on the ground plane must be positive.
    #[error("world scale must be positive on x and z, got ({x}, {z})")]
    InvalidScale { x: f32, z: f32 },

    /// The heightfield must tile exactly into patches.
    #[error(
        "heightfield resolution {size} does not tile into patches of \
         {patch_size} vertices ((size - 1) must divide by patch_size - 1)"
    )]
    GridMismatch { size: usize, patch_size: u32 },

    /// At least one LOD band is required.
    #[error("max_lod must be at least 1")]
    NoLodBands,

    /// The coarsest LOD's sampling step must land on grid vertices.
    #[error(
        "max LOD {max_lod} needs a step of {step} vertices, which exceeds \
         the {calc_patch_size}-cell patch span"
    )]
    UnreachableLod {
        max_lod: u32,
        step: u32,
        calc_patch_size: u32,
    },

    /// An override threshold table must cover every LOD band exactly.
    #[error("override table must hold exactly {expected} thresholds, got {actual}")]
    ThresholdCountMismatch { expected: usize, actual: usize },
}
