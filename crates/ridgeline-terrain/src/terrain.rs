//! The terrain orchestrator: owns the static vertex buffer and patch graph,
//! drives LOD selection and index stitching each frame, and hands the
//! results to the GPU mesh collaborator.

use glam::{Quat, Vec3};
use ridgeline_heightfield::HeightSource;
use ridgeline_lod::{CameraMemo, LodDistanceTable, LodSelector};
use ridgeline_math::Aabb;
use tracing::{debug, info};

use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::mesh::{CullingVolume, TerrainMesh};
use crate::patch::PatchGrid;
use crate::stitch::build_indices;
use crate::vertex::TerrainVertex;

/// Per-frame camera sample: world position plus orientation, both feeding
/// the temporal-coherence gate (position also drives patch distances).
#[derive(Clone, Copy, Debug)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Snapshot of per-frame terrain output for instrumentation.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainStats {
    /// Entries currently in the index buffer.
    pub index_count: usize,
    /// Triangles currently in the index buffer.
    pub triangle_count: usize,
    /// Patch histogram by LOD level, finest first.
    pub patches_at_lod: Vec<usize>,
}

/// A continuous-LOD heightfield terrain over a single in-memory grid.
///
/// Built once from a [`HeightSource`]; after that the only per-frame
/// mutations are each patch's `current_lod` and the index buffer.
#[derive(Debug)]
pub struct Terrain {
    config: TerrainConfig,
    size: usize,
    vertices: Vec<TerrainVertex>,
    grid: PatchGrid,
    selector: LodSelector,
    memo: CameraMemo,
    indices: Vec<u32>,
    vertices_uploaded: bool,
}

impl Terrain {
    /// Build the static vertex buffer, patch graph, and LOD band table.
    ///
    /// Fails fast on bad configurations: grids that don't tile into
    /// patches and LOD counts the patch span cannot express.
    pub fn new(source: &dyn HeightSource, config: TerrainConfig) -> Result<Self, TerrainError> {
        let size = source.resolution();
        config.validate(size)?;

        let vertices = build_vertices(source, &config, size);
        let grid = PatchGrid::build(&vertices, size, config.patch_size);
        let table = LodDistanceTable::geomip(
            config.patch_size,
            config.scale.x,
            config.scale.z,
            config.max_lod,
        );

        info!(
            size,
            patches = grid.patches().len(),
            max_lod = config.max_lod,
            vertices = vertices.len(),
            "terrain built"
        );

        Ok(Self {
            memo: CameraMemo::new(config.movement_delta, config.rotation_delta),
            selector: LodSelector::new(table),
            config,
            size,
            vertices,
            grid,
            indices: Vec::new(),
            vertices_uploaded: false,
        })
    }

    /// Assign a LOD to every patch for the given camera pose.
    ///
    /// Returns `false` when the coherence gate skipped the pass; the
    /// previous frame's index buffer then remains valid. Distance is
    /// measured to each patch's precomputed box center, not its nearest
    /// point; the error is at most half a patch diagonal.
    pub fn select_lod(&mut self, camera: &CameraPose) -> bool {
        if !self.memo.should_update(camera.position, camera.rotation) {
            return false;
        }
        for patch in self.grid.patches_mut() {
            patch.previous_lod = patch.current_lod;
            let distance_sq = patch.center.distance_squared(camera.position);
            patch.current_lod = i32::from(self.selector.select(distance_sq));
        }
        true
    }

    /// Run one frame.
    ///
    /// In order: terrain-level frustum cull (skip everything when the
    /// aggregate box is out of view), LOD selection behind the coherence
    /// gate, index rebuild plus upload only when selection changed, then
    /// the draw call through the mesh.
    pub fn render(
        &mut self,
        camera: &CameraPose,
        culler: &dyn CullingVolume,
        mesh: &mut dyn TerrainMesh,
    ) {
        if !culler.is_visible(self.grid.bounds()) {
            return;
        }
        if !self.vertices_uploaded {
            mesh.set_vertex_data(&self.vertices);
            self.vertices_uploaded = true;
        }
        if self.select_lod(camera) {
            build_indices(&self.grid, &mut self.indices);
            mesh.set_index_data(&self.indices);
            debug!(
                indices = self.indices.len(),
                triangles = self.indices.len() / 3,
                "rebuilt terrain index buffer"
            );
        }
        mesh.draw();
    }

    /// Replace the derived LOD bands with a designer-tuned table of squared
    /// distances, one per LOD level, and force the next frame to recompute.
    ///
    /// # Panics
    ///
    /// Panics if the values are not positive and strictly increasing.
    pub fn set_override_thresholds(&mut self, thresholds: Vec<f32>) -> Result<(), TerrainError> {
        let expected = self.config.max_lod as usize;
        if thresholds.len() != expected {
            return Err(TerrainError::ThresholdCountMismatch {
                expected,
                actual: thresholds.len(),
            });
        }
        self.selector
            .set_table(LodDistanceTable::from_thresholds(thresholds));
        self.memo.reset();
        Ok(())
    }

    /// Drop the camera memo so the next frame recomputes unconditionally.
    pub fn force_update(&mut self) {
        self.memo.reset();
    }

    /// Heightfield vertices per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The construction parameters.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// The static shared vertex buffer, row-major.
    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// The current triangle-list index buffer.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The patch graph (topology plus per-patch LOD state).
    pub fn grid(&self) -> &PatchGrid {
        &self.grid
    }

    /// Aggregate world-space bounding box.
    pub fn bounds(&self) -> &Aabb {
        self.grid.bounds()
    }

    /// Current index/triangle counts and the per-LOD patch histogram.
    pub fn stats(&self) -> TerrainStats {
        let mut patches_at_lod = vec![0usize; self.config.max_lod as usize];
        for patch in self.grid.patches() {
            if patch.current_lod >= 0 {
                patches_at_lod[patch.current_lod as usize] += 1;
            }
        }
        TerrainStats {
            index_count: self.indices.len(),
            triangle_count: self.indices.len() / 3,
            patches_at_lod,
        }
    }
}

/// Bake world position, world scale, and the height multiplier into the
/// static vertex buffer so per-frame work touches indices only.
fn build_vertices(
    source: &dyn HeightSource,
    config: &TerrainConfig,
    size: usize,
) -> Vec<TerrainVertex> {
    let uv_step = 1.0 / (size - 1) as f32;
    let mut vertices = Vec::with_capacity(size * size);
    for z in 0..size {
        for x in 0..size {
            let height = source.height(x as f32, z as f32) * config.height_scale;
            let base_uv = [x as f32 * uv_step, z as f32 * uv_step];
            vertices.push(TerrainVertex {
                position: [
                    config.position.x + x as f32 * config.scale.x,
                    config.position.y + height * config.scale.y,
                    config.position.z + z as f32 * config.scale.z,
                ],
                base_uv,
                detail_uv: [
                    base_uv[0] * config.detail_repeat,
                    base_uv[1] * config.detail_repeat,
                ],
            });
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::AlwaysVisible;
    use ridgeline_heightfield::HeightGrid;

    /// Mock mesh counting collaborator calls, in place of a GPU buffer.
    #[derive(Default)]
    struct CountingMesh {
        vertex_uploads: usize,
        index_uploads: usize,
        draws: usize,
        last_indices: Vec<u32>,
    }

    impl TerrainMesh for CountingMesh {
        fn set_vertex_data(&mut self, _vertices: &[TerrainVertex]) {
            self.vertex_uploads += 1;
        }
        fn set_index_data(&mut self, indices: &[u32]) {
            self.index_uploads += 1;
            self.last_indices = indices.to_vec();
        }
        fn draw(&mut self) {
            self.draws += 1;
        }
    }

    struct NeverVisible;
    impl CullingVolume for NeverVisible {
        fn is_visible(&self, _aabb: &Aabb) -> bool {
            false
        }
    }

    fn flat_source(size: usize) -> HeightGrid {
        HeightGrid::from_fn(size, |_, _| 0.0).unwrap()
    }

    fn camera_at(position: Vec3) -> CameraPose {
        CameraPose {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    fn small_terrain() -> Terrain {
        Terrain::new(
            &flat_source(17),
            TerrainConfig {
                max_lod: 1,
                ..Default::default()
            },
        )
        .unwrap()
    }

    /// size=17, patch_size=17 yields exactly one patch.
    #[test]
    fn test_single_patch_terrain_shape() {
        let terrain = small_terrain();
        assert_eq!(terrain.grid().patch_count(), 1);
        assert_eq!(terrain.vertices().len(), 17 * 17);
    }

    /// Camera on the patch yields LOD 0 and the full-resolution index count.
    #[test]
    fn test_full_detail_index_count() {
        let mut terrain = small_terrain();
        let camera = camera_at(terrain.grid().patch(0, 0).center);
        let mut mesh = CountingMesh::default();

        terrain.render(&camera, &AlwaysVisible, &mut mesh);

        assert_eq!(terrain.grid().patch(0, 0).current_lod, 0);
        assert_eq!(mesh.last_indices.len(), 16 * 16 * 6);
        assert_eq!(mesh.vertex_uploads, 1);
        assert_eq!(mesh.index_uploads, 1);
        assert_eq!(mesh.draws, 1);
    }

    /// After a selection pass every patch LOD is inside [0, max_lod).
    #[test]
    fn test_selected_lods_in_range() {
        let mut terrain = Terrain::new(&flat_source(129), TerrainConfig::default()).unwrap();
        for position in [
            Vec3::ZERO,
            Vec3::new(64.0, 50.0, 64.0),
            Vec3::new(1.0e4, 0.0, -1.0e4),
        ] {
            terrain.force_update();
            assert!(terrain.select_lod(&camera_at(position)));
            for patch in terrain.grid().patches() {
                assert!(
                    (0..terrain.config().max_lod as i32).contains(&patch.current_lod),
                    "LOD {} out of range for camera {position}",
                    patch.current_lod
                );
            }
        }
    }

    /// Distant patches pick coarser LODs than the patch under the camera.
    #[test]
    fn test_distance_drives_coarseness() {
        let mut terrain = Terrain::new(&flat_source(129), TerrainConfig::default()).unwrap();
        let near_center = terrain.grid().patch(0, 0).center;
        assert!(terrain.select_lod(&camera_at(near_center)));

        let near = terrain.grid().patch(0, 0).current_lod;
        let far = terrain.grid().patch(7, 7).current_lod;
        assert_eq!(near, 0);
        assert!(far > near, "far patch LOD {far} not coarser than {near}");
    }

    /// The coherence gate skips recomputation for a static camera, and the
    /// index buffer is not re-uploaded.
    #[test]
    fn test_static_camera_skips_index_upload() {
        let mut terrain = Terrain::new(&flat_source(33), TerrainConfig::default()).unwrap();
        let camera = camera_at(Vec3::new(5.0, 10.0, 5.0));
        let mut mesh = CountingMesh::default();

        terrain.render(&camera, &AlwaysVisible, &mut mesh);
        terrain.render(&camera, &AlwaysVisible, &mut mesh);
        // Sub-delta wiggle also stays gated.
        let wiggle = camera_at(Vec3::new(6.0, 10.0, 4.0));
        terrain.render(&wiggle, &AlwaysVisible, &mut mesh);

        assert_eq!(mesh.vertex_uploads, 1);
        assert_eq!(mesh.index_uploads, 1, "static camera must not re-upload");
        assert_eq!(mesh.draws, 3, "draw still runs every frame");
    }

    /// Idempotence: a gated second pass leaves LODs untouched.
    #[test]
    fn test_gated_pass_preserves_lods() {
        let mut terrain = Terrain::new(&flat_source(33), TerrainConfig::default()).unwrap();
        let camera = camera_at(Vec3::new(16.0, 8.0, 16.0));
        assert!(terrain.select_lod(&camera));
        let lods: Vec<i32> = terrain.grid().patches().iter().map(|p| p.current_lod).collect();

        assert!(!terrain.select_lod(&camera));
        let after: Vec<i32> = terrain.grid().patches().iter().map(|p| p.current_lod).collect();
        assert_eq!(lods, after);
    }

    /// Identical camera state after a forced update produces a
    /// byte-identical index buffer.
    #[test]
    fn test_deterministic_rebuild() {
        let mut terrain = Terrain::new(&flat_source(33), TerrainConfig::default()).unwrap();
        let camera = camera_at(Vec3::new(30.0, 20.0, 30.0));
        let mut mesh = CountingMesh::default();

        terrain.render(&camera, &AlwaysVisible, &mut mesh);
        let first = mesh.last_indices.clone();

        terrain.force_update();
        terrain.render(&camera, &AlwaysVisible, &mut mesh);

        assert_eq!(mesh.index_uploads, 2);
        assert_eq!(mesh.last_indices, first);
    }

    /// A culled terrain does nothing at all — no uploads, no draw.
    #[test]
    fn test_out_of_view_terrain_skips_frame() {
        let mut terrain = Terrain::new(&flat_source(33), TerrainConfig::default()).unwrap();
        let mut mesh = CountingMesh::default();

        terrain.render(&camera_at(Vec3::ZERO), &NeverVisible, &mut mesh);

        assert_eq!(mesh.vertex_uploads, 0);
        assert_eq!(mesh.index_uploads, 0);
        assert_eq!(mesh.draws, 0);
    }

    /// Moving the camera far enough re-selects and re-uploads.
    #[test]
    fn test_camera_move_triggers_rebuild() {
        let mut terrain = Terrain::new(&flat_source(129), TerrainConfig::default()).unwrap();
        let mut mesh = CountingMesh::default();

        terrain.render(&camera_at(Vec3::ZERO), &AlwaysVisible, &mut mesh);
        terrain.render(&camera_at(Vec3::new(200.0, 0.0, 200.0)), &AlwaysVisible, &mut mesh);

        assert_eq!(mesh.index_uploads, 2);
        assert_eq!(mesh.vertex_uploads, 1, "vertices upload exactly once");
    }

    /// Threshold overrides must cover every band.
    #[test]
    fn test_override_threshold_count_checked() {
        let mut terrain = Terrain::new(&flat_source(33), TerrainConfig::default()).unwrap();
        let err = terrain.set_override_thresholds(vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            TerrainError::ThresholdCountMismatch {
                expected: 5,
                actual: 2
            }
        ));
        assert!(
            terrain
                .set_override_thresholds(vec![1.0, 2.0, 3.0, 4.0, 5.0])
                .is_ok()
        );
    }

    /// An override changes selection on the next (forced) pass.
    #[test]
    fn test_override_thresholds_apply() {
        let mut terrain = Terrain::new(&flat_source(33), TerrainConfig::default()).unwrap();
        let camera = camera_at(Vec3::new(16.0, 0.0, 16.0));
        assert!(terrain.select_lod(&camera));
        let before: Vec<i32> = terrain.grid().patches().iter().map(|p| p.current_lod).collect();

        // Absurdly small bands force every patch to the coarsest level.
        terrain
            .set_override_thresholds(vec![0.01, 0.02, 0.03, 0.04, 0.05])
            .unwrap();
        assert!(terrain.select_lod(&camera), "override must reopen the gate");
        let after: Vec<i32> = terrain.grid().patches().iter().map(|p| p.current_lod).collect();

        assert_ne!(before, after);
        assert!(after.iter().all(|&lod| lod == 4));
    }

    /// Heights, height_scale, and world transform bake into vertex positions.
    #[test]
    fn test_vertex_baking() {
        let source = HeightGrid::from_fn(17, |x, z| (x + z) as f32).unwrap();
        let config = TerrainConfig {
            position: Vec3::new(100.0, 5.0, -50.0),
            scale: Vec3::new(2.0, 3.0, 4.0),
            height_scale: 0.5,
            max_lod: 1,
            ..Default::default()
        };
        let terrain = Terrain::new(&source, config).unwrap();

        // Vertex (1, 2): height (1+2)*0.5 = 1.5, scaled by 3 and offset 5.
        let v = &terrain.vertices()[2 * 17 + 1];
        assert_eq!(v.position, [102.0, 9.5, -42.0]);
        assert!((v.base_uv[0] - 1.0 / 16.0).abs() < 1e-6);
        assert!((v.detail_uv[0] - 20.0 / 16.0).abs() < 1e-6);
    }

    /// Stats reflect the current frame's selection and index buffer.
    #[test]
    fn test_stats_histogram() {
        let mut terrain = small_terrain();
        let mut mesh = CountingMesh::default();
        terrain.render(
            &camera_at(terrain.grid().patch(0, 0).center),
            &AlwaysVisible,
            &mut mesh,
        );

        let stats = terrain.stats();
        assert_eq!(stats.index_count, 16 * 16 * 6);
        assert_eq!(stats.triangle_count, 16 * 16 * 2);
        assert_eq!(stats.patches_at_lod, vec![1]);
    }

    /// Construction propagates config validation failures.
    #[test]
    fn test_new_rejects_bad_config() {
        let err = Terrain::new(&flat_source(24), TerrainConfig::default()).unwrap_err();
        assert!(matches!(err, TerrainError::GridMismatch { .. }));
    }

    /// The terrain (and everything it owns) is debug-printable, so
    /// `Result<Terrain, _>` works with `unwrap_err` and assertion output.
    #[test]
    fn test_terrain_is_debug_printable() {
        let terrain = small_terrain();
        assert!(format!("{terrain:?}").starts_with("Terrain"));
    }
}
