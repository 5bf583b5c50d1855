use glam::Vec3;

/// Axis-aligned bounding box in f32 world space.
///
/// Invariant: min.x <= max.x, min.y <= max.y, min.z <= max.z.
/// The two-corner constructor enforces this by sorting components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two corners. Automatically sorts
    /// components so that min <= max on every axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a degenerate AABB containing a single point.
    ///
    /// Useful as the seed when growing a box over a vertex span.
    pub fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// Grow the box to include the given point.
    pub fn add_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Returns the smallest AABB enclosing both self and other.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Returns true if this AABB overlaps with other
    /// (including touching faces).
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Returns the center point of the AABB.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the half-extents (half-size along each axis).
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Returns the size along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns true if the AABB has zero extent on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y || self.min.z == self.max.z
    }
}
