//! Ray representation for path tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, a semi-infinite line used
//! for intersection testing.

use crate::vec::{Point3, Vec3};

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera position for primary rays, a surface point for scattered rays.
    pub origin: Point3,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized; code that needs a unit direction
    /// (reflectance, sky gradient) normalizes it locally.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + t * self.direction
    }
}
