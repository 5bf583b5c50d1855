//! Procedural heightfield backed by multi-octave fractal Brownian motion
//! over simplex noise. Useful for demos and for exercising the terrain
//! pipeline without heightmap assets.

use noise::{NoiseFn, Simplex};

use crate::error::HeightFieldError;
use crate::source::HeightSource;

/// Configuration for multi-octave fBm noise.
#[derive(Clone, Debug)]
pub struct FbmParams {
    /// Seed for deterministic generation.
    pub seed: u64,
    /// Number of noise octaves to composite. More octaves add finer detail
    /// at the cost of additional computation. Typical range: 4-8.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the first (lowest) octave, in cycles per grid vertex.
    pub base_frequency: f64,
    /// Amplitude of the first octave in height units.
    pub amplitude: f64,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.01,
            amplitude: 64.0,
        }
    }
}

/// A [`HeightSource`] that evaluates fBm simplex noise at grid coordinates.
///
/// Each sample composites multiple octaves, where each successive octave
/// scales frequency by `lacunarity` and amplitude by `persistence`.
/// The noise field is continuous, so fractional coordinates interpolate
/// smoothly without explicit bilinear blending.
#[derive(Debug)]
pub struct FbmHeightField {
    noise: Simplex,
    params: FbmParams,
    resolution: usize,
}

impl FbmHeightField {
    /// Create a procedural heightfield with the given grid resolution.
    pub fn new(resolution: usize, params: FbmParams) -> Result<Self, HeightFieldError> {
        if resolution < 2 {
            return Err(HeightFieldError::TooSmall { resolution });
        }
        let noise = Simplex::new(params.seed as u32);
        Ok(Self {
            noise,
            params,
            resolution,
        })
    }

    /// Theoretical maximum absolute height (geometric series over octaves).
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.params.amplitude;
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= self.params.persistence;
        }
        sum
    }

    /// Current noise parameters.
    pub fn params(&self) -> &FbmParams {
        &self.params
    }
}

impl HeightSource for FbmHeightField {
    fn resolution(&self) -> usize {
        self.resolution
    }

    fn height(&self, x: f32, z: f32) -> f32 {
        let max = (self.resolution - 1) as f32;
        let x = x.clamp(0.0, max) as f64;
        let z = z.clamp(0.0, max) as f64;

        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism_same_seed_same_coord() {
        let params = FbmParams {
            seed: 42,
            ..Default::default()
        };
        let a = FbmHeightField::new(129, params.clone()).unwrap();
        let b = FbmHeightField::new(129, params).unwrap();

        let h1 = a.height(100.0, 27.0);
        let h2 = b.height(100.0, 27.0);
        assert_eq!(h1, h2, "same seed + same coord must match: {h1} vs {h2}");
    }

    #[test]
    fn test_different_seeds_produce_different_heights() {
        let a = FbmHeightField::new(
            65,
            FbmParams {
                seed: 1,
                ..Default::default()
            },
        )
        .unwrap();
        let b = FbmHeightField::new(
            65,
            FbmParams {
                seed: 999,
                ..Default::default()
            },
        )
        .unwrap();

        assert_ne!(a.height(30.0, 30.0), b.height(30.0, 30.0));
    }

    #[test]
    fn test_height_within_max_amplitude() {
        let field = FbmHeightField::new(65, FbmParams::default()).unwrap();
        let max_amp = field.max_amplitude() as f32;

        for z in 0..65 {
            for x in 0..65 {
                let h = field.height(x as f32, z as f32);
                assert!(
                    h.abs() <= max_amp + 1e-3,
                    "height {h} exceeds max amplitude {max_amp} at ({x}, {z})"
                );
            }
        }
    }

    #[test]
    fn test_coordinates_clamp_to_grid() {
        let field = FbmHeightField::new(17, FbmParams::default()).unwrap();
        assert_eq!(field.height(-10.0, 0.0), field.height(0.0, 0.0));
        assert_eq!(field.height(100.0, 16.0), field.height(16.0, 16.0));
    }

    #[test]
    fn test_too_small_resolution_rejected() {
        let err = FbmHeightField::new(1, FbmParams::default()).unwrap_err();
        assert!(matches!(err, HeightFieldError::TooSmall { resolution: 1 }));
    }
}
