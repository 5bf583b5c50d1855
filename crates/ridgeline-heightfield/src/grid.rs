//! Owned heightfield sample grid with bilinear interpolation and loaders
//! for grayscale image and raw little-endian f32 heightmaps.

use std::path::Path;

use crate::error::HeightFieldError;
use crate::source::HeightSource;

/// A square grid of height samples, row-major with index `z * resolution + x`.
///
/// Built once at load time; sampling never mutates.
#[derive(Debug)]
pub struct HeightGrid {
    resolution: usize,
    samples: Vec<f32>,
}

impl HeightGrid {
    /// Create a grid from an existing sample buffer.
    ///
    /// The buffer must hold exactly `resolution * resolution` values in
    /// row-major order (`z * resolution + x`).
    pub fn from_samples(resolution: usize, samples: Vec<f32>) -> Result<Self, HeightFieldError> {
        if resolution < 2 {
            return Err(HeightFieldError::TooSmall { resolution });
        }
        let expected = resolution * resolution;
        if samples.len() != expected {
            return Err(HeightFieldError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            resolution,
            samples,
        })
    }

    /// Create a grid by evaluating `f(x, z)` at every lattice point.
    pub fn from_fn(
        resolution: usize,
        f: impl Fn(usize, usize) -> f32,
    ) -> Result<Self, HeightFieldError> {
        if resolution < 2 {
            return Err(HeightFieldError::TooSmall { resolution });
        }
        let mut samples = Vec::with_capacity(resolution * resolution);
        for z in 0..resolution {
            for x in 0..resolution {
                samples.push(f(x, z));
            }
        }
        Ok(Self {
            resolution,
            samples,
        })
    }

    /// Load a grayscale heightmap image from disk.
    ///
    /// The image must be square; one vertex per pixel. Pixel luminance maps
    /// to height in `[0, 255]` regardless of bit depth, matching the classic
    /// 8-bit heightmap convention.
    pub fn open_image(path: impl AsRef<Path>) -> Result<Self, HeightFieldError> {
        let img = image::open(path).map_err(HeightFieldError::ImageError)?;
        Self::from_image(&img)
    }

    /// Build a grid from an already-decoded image. See [`Self::open_image`].
    pub fn from_image(img: &image::DynamicImage) -> Result<Self, HeightFieldError> {
        let (width, height) = (img.width(), img.height());
        if width != height {
            return Err(HeightFieldError::NotSquare { width, height });
        }
        let luma = img.to_luma16();
        let scale = 255.0 / u16::MAX as f32;
        let samples = luma.pixels().map(|p| p.0[0] as f32 * scale).collect();
        Self::from_samples(width as usize, samples)
    }

    /// Load a raw heightmap of little-endian f32 samples from disk.
    ///
    /// The file must hold exactly `resolution * resolution` samples in
    /// row-major order.
    pub fn open_raw_f32(
        path: impl AsRef<Path>,
        resolution: usize,
    ) -> Result<Self, HeightFieldError> {
        let bytes = std::fs::read(path).map_err(HeightFieldError::ReadError)?;
        if resolution < 2 {
            return Err(HeightFieldError::TooSmall { resolution });
        }
        let expected = resolution * resolution * size_of::<f32>();
        if bytes.len() != expected {
            return Err(HeightFieldError::RawSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let samples = bytes
            .chunks_exact(size_of::<f32>())
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Self::from_samples(resolution, samples)
    }

    /// Height sample at integer grid coordinates, clamped to the grid.
    pub fn get(&self, x: usize, z: usize) -> f32 {
        let x = x.min(self.resolution - 1);
        let z = z.min(self.resolution - 1);
        self.samples[z * self.resolution + x]
    }

    /// Raw sample buffer, row-major.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

impl HeightSource for HeightGrid {
    fn resolution(&self) -> usize {
        self.resolution
    }

    fn height(&self, x: f32, z: f32) -> f32 {
        let max = (self.resolution - 1) as f32;
        let x = x.clamp(0.0, max);
        let z = z.clamp(0.0, max);

        let x0 = x.floor() as usize;
        let z0 = z.floor() as usize;
        let fx = x - x0 as f32;
        let fz = z - z0 as f32;

        let h00 = self.get(x0, z0);
        let h10 = self.get(x0 + 1, z0);
        let h01 = self.get(x0, z0 + 1);
        let h11 = self.get(x0 + 1, z0 + 1);

        let top = h00 + (h10 - h00) * fx;
        let bottom = h01 + (h11 - h01) * fx;
        top + (bottom - top) * fz
    }
}
