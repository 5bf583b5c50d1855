//! Frustum culling: f32 AABB tests against view-projection planes.
//!
//! The terrain runs one visibility test per frame against its aggregate
//! bounding box; this module supplies that test from the camera's
//! view-projection matrix.

use glam::{Mat4, Vec3, Vec4};
use ridgeline_math::Aabb;
use ridgeline_terrain::CullingVolume;

/// Plane indices into the frustum planes array.
const LEFT: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const TOP: usize = 3;
const NEAR: usize = 4;
const FAR: usize = 5;

/// Six inward-facing clip planes describing what the camera can see.
#[derive(Clone, Debug)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far. Each `Vec4(a, b, c, d)` packs
    /// a unit normal `(a,b,c)` pointing into the frustum and the plane's
    /// distance term `d`.
    planes: [Vec4; 6],
}

impl Frustum {
    /// Derive the clip planes from a combined view-projection matrix by
    /// the usual row combinations, for perspective or orthographic
    /// projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut planes = [Vec4::ZERO; 6];
        planes[LEFT] = rows[3] + rows[0];
        planes[RIGHT] = rows[3] - rows[0];
        planes[BOTTOM] = rows[3] + rows[1];
        planes[TOP] = rows[3] - rows[1];
        // Reverse-Z projections map near→z=1 and far→z=0, so row3-row2
        // would not describe the far clip. row2 alone is the far plane
        // there; row3+row2 stays the near plane either way.
        planes[NEAR] = rows[3] + rows[2];
        planes[FAR] = rows[2];

        // Unit-length normals so plane distances compare directly.
        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 0.0 {
                *plane /= len;
            }
        }

        Self { planes }
    }

    /// Whether any part of the box could be inside the frustum.
    ///
    /// Per plane, only the box corner furthest along the plane normal is
    /// checked; if even that corner sits behind one plane the whole box
    /// does. The test errs toward visible near frustum corners but never
    /// rejects geometry the camera can see.
    pub fn is_visible(&self, aabb: &Aabb) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();
            let d = plane.w;

            // The corner furthest along the plane normal.
            let p = Vec3::new(
                if normal.x >= 0.0 {
                    aabb.max.x
                } else {
                    aabb.min.x
                },
                if normal.y >= 0.0 {
                    aabb.max.y
                } else {
                    aabb.min.y
                },
                if normal.z >= 0.0 {
                    aabb.max.z
                } else {
                    aabb.min.z
                },
            );

            if normal.dot(p) + d < 0.0 {
                return false;
            }
        }
        true
    }
}

/// Per-frame culler handed to [`ridgeline_terrain::Terrain::render`].
///
/// Constructed once per frame from the camera's view-projection matrix.
pub struct FrustumCuller {
    frustum: Frustum,
}

impl FrustumCuller {
    /// Create a new culler from the camera's view-projection matrix.
    pub fn new(view_projection: &Mat4) -> Self {
        Self {
            frustum: Frustum::from_view_projection(view_projection),
        }
    }
}

impl CullingVolume for FrustumCuller {
    fn is_visible(&self, aabb: &Aabb) -> bool {
        self.frustum.is_visible(aabb)
    }
}
