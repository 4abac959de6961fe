use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Rays produced by the camera carry a unit-length direction, so the `t`
/// parameter of a hit is a world-space distance. Secondary rays built by hand
/// may use any non-zero direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
