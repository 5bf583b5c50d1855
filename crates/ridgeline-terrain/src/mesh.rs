//! Seams to the external collaborators: the GPU mesh buffer the terrain
//! renders through, and the camera-side visibility test used for the
//! terrain-level cull.

use ridgeline_math::Aabb;

use crate::vertex::TerrainVertex;

/// GPU mesh buffer interface the terrain produces into.
///
/// Vertex data is uploaded once after load and never again; index data is
/// replaced in place on every frame whose LOD selection changed (dynamic
/// buffer semantics); `draw` issues the triangle-list draw call over the
/// current index buffer.
pub trait TerrainMesh {
    /// Upload the static vertex buffer. Called exactly once per terrain.
    fn set_vertex_data(&mut self, vertices: &[TerrainVertex]);

    /// Replace the index buffer contents with this frame's triangle list.
    fn set_index_data(&mut self, indices: &[u32]);

    /// Issue the draw call for the current buffers.
    fn draw(&mut self);
}

/// Visibility test for a world-space bounding box, supplied by the camera
/// side (typically a view frustum). Used once per frame against the
/// aggregate terrain box; per-patch culling is not this core's job.
pub trait CullingVolume {
    /// Returns true if any part of the box may be visible.
    fn is_visible(&self, aabb: &Aabb) -> bool;
}

/// A [`CullingVolume`] that never culls. For tools and tests.
pub struct AlwaysVisible;

impl CullingVolume for AlwaysVisible {
    fn is_visible(&self, _aabb: &Aabb) -> bool {
        true
    }
}
