//! Heightfield error types.

/// Errors that can occur when loading or constructing a heightfield.
#[derive(Debug, thiserror::Error)]
pub enum HeightFieldError {
    /// Failed to read heightmap data from disk.
    #[error("failed to read heightmap: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to decode a heightmap image.
    #[error("failed to decode heightmap image: {0}")]
    ImageError(#[source] image::ImageError),

    /// Heightmap images must be square (one vertex per pixel per side).
    #[error("heightmap must be square, got {width}x{height}")]
    NotSquare { width: u32, height: u32 },

    /// A heightfield needs at least 2 vertices per side to form a quad.
    #[error("heightfield resolution {resolution} is too small (minimum 2)")]
    TooSmall { resolution: usize },

    /// The provided sample buffer does not match the stated resolution.
    #[error("expected {expected} height samples, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// A raw f32 heightmap file has the wrong size for its resolution.
    #[error("raw heightmap holds {actual} bytes, expected {expected}")]
    RawSizeMismatch { expected: usize, actual: usize },
}
