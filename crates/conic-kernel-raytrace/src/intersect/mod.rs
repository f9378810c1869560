//! Ray-primitive intersection algorithms.
//!
//! Each primitive has a dedicated intersector computing exact intersection
//! points from its implicit surface equation.

mod cone_frustum;

pub use cone_frustum::intersect_cone_frustum;

use conic_kernel_math::Point3;

/// Result of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumHit {
    /// Parameter along the ray.
    pub t: f64,
    /// 3D intersection point.
    pub point: Point3,
}
