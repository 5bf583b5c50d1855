//! Debug overlay: wireframe patch boxes colored by LOD level.
//!
//! Pure diagnostic output — a flat list of colored world-space line
//! segments for whatever line renderer the host engine provides. Carries
//! no state of its own.

use glam::Vec3;
use ridgeline_math::Aabb;

use crate::patch::PatchGrid;

/// A single colored line segment in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: [f32; 4],
}

/// Overlay palette indexed by LOD level; wraps past the end.
pub const LOD_PALETTE: [[f32; 4]; 6] = [
    [1.0, 1.0, 1.0, 1.0], // LOD 0: white, full detail
    [0.0, 1.0, 0.0, 1.0], // green
    [1.0, 1.0, 0.0, 1.0], // yellow
    [1.0, 0.5, 0.0, 1.0], // orange
    [1.0, 0.0, 0.0, 1.0], // red
    [1.0, 0.0, 1.0, 1.0], // magenta
];

/// Overlay color for a patch at the given LOD; culled/unset patches (-1)
/// render gray.
pub fn lod_color(lod: i32) -> [f32; 4] {
    if lod < 0 {
        return [0.4, 0.4, 0.4, 1.0];
    }
    LOD_PALETTE[lod as usize % LOD_PALETTE.len()]
}

/// The twelve edges of a box as line segments.
pub fn box_edges(aabb: &Aabb, color: [f32; 4]) -> [DebugLine; 12] {
    let (min, max) = (aabb.min, aabb.max);
    let corner = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);
    let line = |start: Vec3, end: Vec3| DebugLine { start, end, color };

    let bottom = [
        corner(min.x, min.y, min.z),
        corner(max.x, min.y, min.z),
        corner(max.x, min.y, max.z),
        corner(min.x, min.y, max.z),
    ];
    let top = [
        corner(min.x, max.y, min.z),
        corner(max.x, max.y, min.z),
        corner(max.x, max.y, max.z),
        corner(min.x, max.y, max.z),
    ];

    [
        line(bottom[0], bottom[1]),
        line(bottom[1], bottom[2]),
        line(bottom[2], bottom[3]),
        line(bottom[3], bottom[0]),
        line(top[0], top[1]),
        line(top[1], top[2]),
        line(top[2], top[3]),
        line(top[3], top[0]),
        line(bottom[0], top[0]),
        line(bottom[1], top[1]),
        line(bottom[2], top[2]),
        line(bottom[3], top[3]),
    ]
}

/// Wireframe boxes for every patch, colored by its current LOD, plus the
/// aggregate terrain box in cyan.
pub fn patch_overlay(grid: &PatchGrid) -> Vec<DebugLine> {
    let mut lines = Vec::with_capacity((grid.patches().len() + 1) * 12);
    for patch in grid.patches() {
        lines.extend(box_edges(&patch.aabb, lod_color(patch.current_lod)));
    }
    lines.extend(box_edges(grid.bounds(), [0.0, 1.0, 1.0, 1.0]));
    lines
}

/// Wireframe boxes for only the patches whose LOD changed in the last
/// accepted selection pass, colored by their new LOD.
pub fn changed_patch_overlay(grid: &PatchGrid) -> Vec<DebugLine> {
    grid.patches()
        .iter()
        .filter(|p| p.current_lod != p.previous_lod)
        .flat_map(|p| box_edges(&p.aabb, lod_color(p.current_lod)))
        .collect()
}
