//! Static patch topology over the heightfield vertex grid.
//!
//! Patches tile the grid in overlapping spans: adjacent patches share their
//! boundary vertex row/column, so no vertex data is duplicated — only index
//! references are. Topology, bounding boxes, and neighbor wiring are built
//! once at load; `current_lod` is the only field that mutates per frame.

use glam::Vec3;
use ridgeline_math::Aabb;

use crate::vertex::TerrainVertex;

/// One of the four patch borders, also indexing the neighbor array.
///
/// `Top` is the `z == 0` edge, `Bottom` the `z == calc_patch_size` edge,
/// `Left`/`Right` the `x == 0` / `x == calc_patch_size` edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
}

impl Border {
    /// All four borders, in neighbor-array order.
    pub const ALL: [Border; 4] = [Border::Top, Border::Bottom, Border::Left, Border::Right];
}

/// A fixed-size square sub-grid of the heightfield; the unit of LOD
/// assignment.
#[derive(Clone, Debug)]
pub struct Patch {
    /// LOD assigned this frame; -1 until the first selection pass.
    pub current_lod: i32,
    /// LOD of the previous accepted selection pass.
    pub previous_lod: i32,
    /// World-space bounds over the patch's inclusive vertex span.
    pub aabb: Aabb,
    /// Box center; the reference point for camera distance.
    pub center: Vec3,
    neighbors: [Option<usize>; 4],
}

impl Patch {
    /// Index of the adjacent patch across the given border, if any.
    pub fn neighbor(&self, border: Border) -> Option<usize> {
        self.neighbors[border as usize]
    }

    /// Number of non-null neighbors (2 for corner patches, 3 for edge
    /// patches, 4 in the interior).
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.iter().flatten().count()
    }
}

/// The full patch graph: flat row-major patch array plus aggregate bounds.
#[derive(Debug)]
pub struct PatchGrid {
    size: usize,
    patch_count: usize,
    calc_patch_size: u32,
    patches: Vec<Patch>,
    bounds: Aabb,
}

impl PatchGrid {
    /// Build the patch topology over a vertex grid.
    ///
    /// Assumes the configuration already validated: `(size - 1)` divides
    /// evenly by `patch_size - 1`. Patch `(px, pz)` covers the inclusive
    /// vertex span `[px·cells, px·cells + cells]` on each axis.
    pub fn build(vertices: &[TerrainVertex], size: usize, patch_size: u32) -> Self {
        let cells = (patch_size - 1) as usize;
        let patch_count = (size - 1) / cells;
        debug_assert_eq!(vertices.len(), size * size);
        debug_assert_eq!((size - 1) % cells, 0, "grid must tile into patches");

        let mut patches = Vec::with_capacity(patch_count * patch_count);
        let mut bounds: Option<Aabb> = None;

        for px in 0..patch_count {
            for pz in 0..patch_count {
                let x0 = px * cells;
                let z0 = pz * cells;

                let mut aabb = Aabb::from_point(vertices[z0 * size + x0].position.into());
                for z in z0..=z0 + cells {
                    for x in x0..=x0 + cells {
                        aabb.add_point(vertices[z * size + x].position.into());
                    }
                }

                let neighbors = [
                    (pz > 0).then(|| px * patch_count + (pz - 1)),
                    (pz + 1 < patch_count).then(|| px * patch_count + (pz + 1)),
                    (px > 0).then(|| (px - 1) * patch_count + pz),
                    (px + 1 < patch_count).then(|| (px + 1) * patch_count + pz),
                ];

                bounds = Some(match bounds {
                    Some(b) => b.union(&aabb),
                    None => aabb,
                });
                patches.push(Patch {
                    current_lod: -1,
                    previous_lod: -1,
                    center: aabb.center(),
                    aabb,
                    neighbors,
                });
            }
        }

        Self {
            size,
            patch_count,
            calc_patch_size: cells as u32,
            patches,
            // A validated grid always yields at least one patch.
            bounds: bounds.unwrap_or(Aabb::from_point(Vec3::ZERO)),
        }
    }

    /// Heightfield vertices per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Patches per side.
    pub fn patch_count(&self) -> usize {
        self.patch_count
    }

    /// Quad cells per patch edge.
    pub fn calc_patch_size(&self) -> u32 {
        self.calc_patch_size
    }

    /// Flat patch array, row-major with `index = px * patch_count + pz`.
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Mutable access for the per-frame LOD pass.
    pub fn patches_mut(&mut self) -> &mut [Patch] {
        &mut self.patches
    }

    /// Patch at patch-grid coordinates.
    pub fn patch(&self, px: usize, pz: usize) -> &Patch {
        &self.patches[px * self.patch_count + pz]
    }

    /// Aggregate bounding box over every patch.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}
