//! Math primitives shared across the ridgeline terrain crates.

mod aabb;

pub use aabb::Aabb;
