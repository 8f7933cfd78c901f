//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use crate::vec3::{Point3, Vec3};

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera position (or a defocus disk sample) for primary rays, a
    /// surface point for scattered rays.
    pub origin: Point3,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized. Intersection code must tolerate any
    /// length; a zero vector is accepted but gives meaningless shading.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}
