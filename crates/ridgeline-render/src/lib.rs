//! wgpu backend for the terrain core.
//!
//! Provides the GPU-side implementations of the terrain's collaborator
//! traits: [`GpuTerrainMesh`] backs [`ridgeline_terrain::TerrainMesh`]
//! with real vertex/index buffers, and [`FrustumCuller`] backs
//! [`ridgeline_terrain::CullingVolume`] with view-frustum plane tests.

mod frustum;
mod gpu_mesh;

pub use frustum::{Frustum, FrustumCuller};
pub use gpu_mesh::{GpuTerrainMesh, terrain_vertex_layout};
