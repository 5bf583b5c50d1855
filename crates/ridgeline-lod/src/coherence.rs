//! Temporal-coherence gate: skip LOD recomputation while the camera sits still.

use glam::{Quat, Vec3};

/// Remembers the camera pose of the last accepted LOD pass.
///
/// Index rebuilding is the most expensive per-frame step, so a static or
/// near-static camera skips it entirely: the previous frame's index buffer
/// stays valid. Position is compared per axis against `movement_delta`;
/// orientation against `rotation_delta` (radians, quaternion angle).
#[derive(Clone, Debug)]
pub struct CameraMemo {
    movement_delta: f32,
    rotation_delta: f32,
    last: Option<(Vec3, Quat)>,
}

impl CameraMemo {
    /// Create a gate with the given per-axis movement threshold (world
    /// units) and rotation threshold (radians).
    pub fn new(movement_delta: f32, rotation_delta: f32) -> Self {
        Self {
            movement_delta,
            rotation_delta,
            last: None,
        }
    }

    /// Report whether the camera moved enough to warrant a new LOD pass,
    /// updating the remembered pose when it did.
    ///
    /// The first call after construction or [`Self::reset`] always accepts.
    pub fn should_update(&mut self, position: Vec3, rotation: Quat) -> bool {
        if let Some((last_position, last_rotation)) = self.last {
            let delta = (position - last_position).abs();
            let moved = delta.x > self.movement_delta
                || delta.y > self.movement_delta
                || delta.z > self.movement_delta;
            let turned = last_rotation.angle_between(rotation) > self.rotation_delta;
            if !moved && !turned {
                return false;
            }
        }
        self.last = Some((position, rotation));
        true
    }

    /// Forget the remembered pose so the next frame recomputes
    /// unconditionally (used after threshold overrides).
    pub fn reset(&mut self) {
        self.last = None;
    }
}
