/// A square grid of terrain heights, sampled on a uniform lattice.
///
/// Terrain construction reads one height per grid vertex; implementations
/// are also expected to interpolate between samples so callers may query
/// fractional coordinates (e.g. for collision follow-up queries).
pub trait HeightSource {
    /// Number of vertices per side of the square grid.
    fn resolution(&self) -> usize;

    /// Height at grid coordinates, bilinearly interpolated between samples.
    ///
    /// Coordinates outside `[0, resolution - 1]` are clamped to the border.
    fn height(&self, x: f32, z: f32) -> f32;
}
