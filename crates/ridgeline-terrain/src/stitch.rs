//! Border-aware index generation.
//!
//! Walks every patch at its assigned LOD and emits a triangle list over the
//! shared vertex buffer. Where a patch borders a coarser neighbor, edge
//! coordinates are snapped down to the neighbor's sampling grid so both
//! patches reference the same physical vertex — a pure index lookup, never a
//! synthesized vertex, which is what makes the result crack-free without
//! skirt geometry.

use crate::patch::{Border, PatchGrid};

/// Rebuild the whole-terrain triangle-list index buffer in place.
///
/// Patches still at LOD -1 (culled/unset) emit nothing. The emission order
/// is a pure function of patch LODs, so identical selection state always
/// produces a byte-identical buffer.
pub fn build_indices(grid: &PatchGrid, indices: &mut Vec<u32>) {
    indices.clear();
    for px in 0..grid.patch_count() {
        for pz in 0..grid.patch_count() {
            append_patch_indices(grid, px, pz, indices);
        }
    }
}

/// Emit one patch's triangles at its current LOD.
///
/// Each quad cell emits `[bl, tl, br, br, tl, tr]`: two triangles sharing
/// the tl-br diagonal in strip-derived order with alternating winding.
/// The renderer's front-face convention depends on this exact order.
fn append_patch_indices(grid: &PatchGrid, px: usize, pz: usize, indices: &mut Vec<u32>) {
    let patch = grid.patch(px, pz);
    if patch.current_lod < 0 {
        return;
    }
    let cells = grid.calc_patch_size();
    let step = 1u32 << patch.current_lod as u32;

    let mut z = 0;
    while z < cells {
        let mut x = 0;
        while x < cells {
            let tl = resolve_index(grid, px, pz, x, z);
            let tr = resolve_index(grid, px, pz, x + step, z);
            let bl = resolve_index(grid, px, pz, x, z + step);
            let br = resolve_index(grid, px, pz, x + step, z + step);
            indices.extend_from_slice(&[bl, tl, br, br, tl, tr]);
            x += step;
        }
        z += step;
    }
}

/// Resolve a patch-local corner to a global vertex index.
///
/// On a border shared with a strictly coarser neighbor, the along-edge
/// coordinate is snapped down to the nearest multiple of the neighbor's
/// step, so the finer patch reuses exactly the border vertices the coarser
/// side emits. Coordinates that stepped past the span clamp back to it.
fn resolve_index(grid: &PatchGrid, px: usize, pz: usize, mut x: u32, mut z: u32) -> u32 {
    let cells = grid.calc_patch_size();
    let patch = grid.patch(px, pz);
    let lod = patch.current_lod;

    let neighbor_lod = |index: usize| grid.patches()[index].current_lod;

    if z == 0 {
        if let Some(top) = patch.neighbor(Border::Top) {
            let n_lod = neighbor_lod(top);
            if n_lod > lod {
                x -= x % (1 << n_lod as u32);
            }
        }
    } else if z == cells {
        if let Some(bottom) = patch.neighbor(Border::Bottom) {
            let n_lod = neighbor_lod(bottom);
            if n_lod > lod {
                x -= x % (1 << n_lod as u32);
            }
        }
    }

    if x == 0 {
        if let Some(left) = patch.neighbor(Border::Left) {
            let n_lod = neighbor_lod(left);
            if n_lod > lod {
                z -= z % (1 << n_lod as u32);
            }
        }
    } else if x == cells {
        if let Some(right) = patch.neighbor(Border::Right) {
            let n_lod = neighbor_lod(right);
            if n_lod > lod {
                z -= z % (1 << n_lod as u32);
            }
        }
    }

    let x = x.min(cells);
    let z = z.min(cells);

    let size = grid.size() as u32;
    (z + cells * pz as u32) * size + (x + cells * px as u32)
}
