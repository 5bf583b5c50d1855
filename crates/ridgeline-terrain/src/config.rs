//! Terrain construction parameters and fail-fast validation.

use glam::Vec3;

use crate::error::TerrainError;

/// Construction parameters for a [`Terrain`](crate::Terrain).
///
/// These are fixed at load time; nothing here is mutated per frame.
#[derive(Clone, Debug)]
pub struct TerrainConfig {
    /// World-space position of grid vertex (0, 0).
    pub position: Vec3,
    /// World-space scale per grid unit on x/z and per height unit on y.
    pub scale: Vec3,
    /// Vertices per patch edge; a power of two plus one (9, 17, 33, 65, 129).
    pub patch_size: u32,
    /// Number of LOD bands; LOD 0 is full resolution.
    pub max_lod: u32,
    /// Extra multiplier applied to source heights before world scale.
    pub height_scale: f32,
    /// Repeat factor for the detail texture coordinate pair.
    pub detail_repeat: f32,
    /// Per-axis camera movement below which LOD recomputation is skipped.
    pub movement_delta: f32,
    /// Camera rotation (radians) below which LOD recomputation is skipped.
    pub rotation_delta: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            patch_size: 17,
            max_lod: 5,
            height_scale: 1.0,
            detail_repeat: 20.0,
            movement_delta: 10.0,
            rotation_delta: 1.0_f32.to_radians(),
        }
    }
}

impl TerrainConfig {
    /// Quad cells per patch edge (`patch_size - 1`).
    pub fn calc_patch_size(&self) -> u32 {
        self.patch_size - 1
    }

    /// Build a terrain config from persisted settings.
    pub fn from_settings(config: &ridgeline_config::Config) -> Self {
        let t = &config.terrain;
        Self {
            position: Vec3::from_array(t.position),
            scale: Vec3::from_array(t.scale),
            patch_size: t.patch_size,
            max_lod: t.max_lod,
            height_scale: t.height_scale,
            detail_repeat: t.detail_repeat,
            movement_delta: config.camera.movement_delta,
            rotation_delta: config.camera.rotation_delta_deg.to_radians(),
        }
    }

    /// Validate this configuration against a heightfield resolution.
    pub fn validate(&self, size: usize) -> Result<(), TerrainError> {
        if self.patch_size < 3 || !(self.patch_size - 1).is_power_of_two() {
            return Err(TerrainError::InvalidPatchSize(self.patch_size));
        }
        if self.scale.x <= 0.0 || self.scale.z <= 0.0 {
            return Err(TerrainError::InvalidScale {
                x: self.scale.x,
                z: self.scale.z,
            });
        }
        let cells = self.calc_patch_size() as usize;
        if size < self.patch_size as usize || (size - 1) % cells != 0 {
            return Err(TerrainError::GridMismatch {
                size,
                patch_size: self.patch_size,
            });
        }
        if self.max_lod == 0 {
            return Err(TerrainError::NoLodBands);
        }
        // Coarsest sampling step must land on grid vertices.
        let step = 1u32.checked_shl(self.max_lod - 1).unwrap_or(u32::MAX);
        if step > self.calc_patch_size() {
            return Err(TerrainError::UnreachableLod {
                max_lod: self.max_lod,
                step,
                calc_patch_size: self.calc_patch_size(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = TerrainConfig::default();
        assert!(config.validate(17).is_ok());
        assert!(config.validate(33).is_ok());
        assert!(config.validate(129).is_ok());
    }

    #[test]
    fn test_even_patch_size_rejected() {
        let config = TerrainConfig {
            patch_size: 16,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(33),
            Err(TerrainError::InvalidPatchSize(16))
        ));
    }

    #[test]
    fn test_non_tiling_grid_rejected() {
        // 24 - 1 = 23 does not divide by 16: patches would under-cover
        // the grid.
        let config = TerrainConfig::default();
        assert!(matches!(
            config.validate(24),
            Err(TerrainError::GridMismatch {
                size: 24,
                patch_size: 17
            })
        ));
    }

    #[test]
    fn test_grid_smaller_than_patch_rejected() {
        let config = TerrainConfig::default();
        assert!(matches!(
            config.validate(9),
            Err(TerrainError::GridMismatch { .. })
        ));
    }

    #[test]
    fn test_unreachable_lod_rejected() {
        // patch_size 17 supports at most 5 bands (step 16 == span).
        let config = TerrainConfig {
            max_lod: 6,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(17),
            Err(TerrainError::UnreachableLod {
                max_lod: 6,
                step: 32,
                calc_patch_size: 16
            })
        ));
    }

    #[test]
    fn test_max_achievable_lod_accepted() {
        let config = TerrainConfig {
            max_lod: 5,
            ..Default::default()
        };
        assert!(config.validate(17).is_ok());
    }

    #[test]
    fn test_zero_lod_bands_rejected() {
        let config = TerrainConfig {
            max_lod: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(17), Err(TerrainError::NoLodBands)));
    }

    #[test]
    fn test_negative_scale_rejected() {
        let config = TerrainConfig {
            scale: Vec3::new(-1.0, 1.0, 1.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(17),
            Err(TerrainError::InvalidScale { .. })
        ));
    }

    #[test]
    fn test_from_settings_converts_degrees() {
        let mut persisted = ridgeline_config::Config::default();
        persisted.terrain.patch_size = 33;
        persisted.camera.rotation_delta_deg = 2.0;
        let config = TerrainConfig::from_settings(&persisted);
        assert_eq!(config.patch_size, 33);
        assert!((config.rotation_delta - 2.0_f32.to_radians()).abs() < 1e-6);
    }
}
