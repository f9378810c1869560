//! Ray representation and basic ray-geometry tests.

use conic_kernel_geom::ConeFrustum;
use conic_kernel_math::{Aabb3, Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::intersect::intersect_cone_frustum;

/// A ray in 3D space defined by origin and direction.
///
/// The direction is not required to be unit length; ray parameters are
/// measured in multiples of `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction, keeping the direction as given.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a new ray with its direction normalized.
    pub fn normalized(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// Nearest point where the ray crosses the lateral surface of `frustum`.
    ///
    /// See [`intersect_cone_frustum`].
    pub fn intersect_cone_frustum(&self, frustum: &ConeFrustum) -> Option<Point3> {
        intersect_cone_frustum(self, frustum).map(|hit| hit.point)
    }

    /// Test ray-AABB intersection using the slab method.
    ///
    /// Returns `Some((t_min, t_max))` if the ray intersects the box,
    /// where `t_min` and `t_max` are the entry and exit parameters.
    /// Returns `None` if no intersection.
    ///
    /// Handles infinite values correctly for axis-aligned rays.
    #[inline]
    pub fn intersect_aabb(&self, aabb: &Aabb3) -> Option<(f64, f64)> {
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for i in 0..3 {
            let inv = 1.0 / self.direction[i];
            let (near, far) = if inv < 0.0 {
                (aabb.max[i], aabb.min[i])
            } else {
                (aabb.min[i], aabb.max[i])
            };
            t_min = t_min.max((near - self.origin[i]) * inv);
            t_max = t_max.min((far - self.origin[i]) * inv);
        }

        if t_max >= t_min && t_max >= 0.0 {
            Some((t_min.max(0.0), t_max))
        } else {
            None
        }
    }
}
