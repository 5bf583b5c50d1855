//! Squared-distance thresholds separating the LOD bands.

/// An ordered table of squared camera distances.
///
/// `threshold_sq(i)` is the squared distance at or beyond which LOD `i`
/// (or coarser) becomes acceptable. Strictly increasing; the selector's
/// coarsest-first scan relies on that ordering. Built once at terrain load
/// (or replaced wholesale by a designer-tuned override) and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct LodDistanceTable {
    thresholds: Vec<f32>,
}

impl LodDistanceTable {
    /// Derive the standard geomipmapping band table from the patch footprint.
    ///
    /// `threshold_sq(i) = patch_size² · scale_x · scale_z · (i + 1 + i/2)²`
    /// with integer `i/2`, giving band multipliers 1, 2, 4, 5, 7, …
    /// One entry per LOD level; entry 0 exists for table shape but the
    /// selector never returns to it via the scan (LOD 0 is the fallback).
    ///
    /// # Panics
    ///
    /// Panics if `max_lod` is zero or the world scale is not positive.
    pub fn geomip(patch_size: u32, scale_x: f32, scale_z: f32, max_lod: u32) -> Self {
        assert!(max_lod > 0, "need at least one LOD band");
        assert!(
            scale_x > 0.0 && scale_z > 0.0,
            "world scale must be positive, got ({scale_x}, {scale_z})"
        );
        let patch_area = (patch_size * patch_size) as f32 * scale_x * scale_z;
        let thresholds = (0..max_lod)
            .map(|i| {
                let band = i + 1 + i / 2;
                patch_area * (band * band) as f32
            })
            .collect();
        Self { thresholds }
    }

    /// Use an externally supplied table instead of the derived one.
    ///
    /// Values are *squared* distances, one per LOD level.
    ///
    /// # Panics
    ///
    /// Panics if the table is empty, contains non-positive values, or is
    /// not strictly increasing.
    pub fn from_thresholds(thresholds: Vec<f32>) -> Self {
        assert!(!thresholds.is_empty(), "must have at least one threshold");
        for (i, &t) in thresholds.iter().enumerate() {
            assert!(t > 0.0, "thresholds must be positive, got {t}");
            if i > 0 {
                assert!(
                    t > thresholds[i - 1],
                    "thresholds must be strictly increasing"
                );
            }
        }
        Self { thresholds }
    }

    /// Number of LOD levels (valid levels are `0..max_lod`).
    pub fn max_lod(&self) -> u32 {
        self.thresholds.len() as u32
    }

    /// Squared distance threshold for the given LOD level.
    pub fn threshold_sq(&self, lod: u32) -> f32 {
        self.thresholds[lod as usize]
    }

    /// The full threshold slice, finest band first.
    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }
}
