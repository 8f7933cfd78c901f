//! Three-component vector primitive.
//!
//! Points, directions and linear RGB colors all share `glam::DVec3`. The
//! handful of operations the tracer needs on top of glam live in [`Vec3Ext`].

use glam::DVec3;

/// Double precision 3D vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB color, one channel per component.
pub type Color = DVec3;

/// Components below this magnitude count as zero for [`Vec3Ext::near_zero`].
pub const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Vector operations used by the scattering code.
pub trait Vec3Ext {
    /// True when every component is smaller than [`NEAR_ZERO_EPSILON`] in magnitude.
    ///
    /// Used to catch scatter directions that cancelled out.
    fn near_zero(&self) -> bool;

    /// Scale to unit length as `v / v.length()`.
    ///
    /// A zero-length input yields NaN components; callers never pass one on
    /// the rendering path except through a degenerate ray direction.
    fn unit_vector(&self) -> Self;
}

impl Vec3Ext for DVec3 {
    fn near_zero(&self) -> bool {
        self.abs().cmplt(DVec3::splat(NEAR_ZERO_EPSILON)).all()
    }

    fn unit_vector(&self) -> Self {
        *self / self.length()
    }
}
