//! Heightfield sources for terrain construction: a common sampling trait,
//! an owned sample grid with image/raw loading, and a procedural fBm source.

mod error;
mod fbm;
mod grid;
mod source;

pub use error::HeightFieldError;
pub use fbm::{FbmHeightField, FbmParams};
pub use grid::HeightGrid;
pub use source::HeightSource;
