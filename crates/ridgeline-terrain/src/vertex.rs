//! The shared terrain vertex format.

use bytemuck::{Pod, Zeroable};

/// One heightfield vertex: world position, base paint UV, and detail UV.
///
/// The whole terrain shares a single flat vertex buffer in row-major order
/// (`z * size + x`), built once at load and immutable afterward; LOD only
/// ever changes which vertices the index buffer references.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub base_uv: [f32; 2],
    pub detail_uv: [f32; 2],
}

/// f32 lanes per vertex; GPU vertex layouts depend on this stride.
pub const FLOATS_PER_VERTEX: usize = 7;

static_assertions::const_assert_eq!(
    std::mem::size_of::<TerrainVertex>(),
    FLOATS_PER_VERTEX * std::mem::size_of::<f32>()
);
