//! The cone frustum primitive.
//!
//! A right circular cone with its tip cut off: two parallel disks of
//! radius `radius0` (at `base`) and `radius1` (at `base + height * axis`)
//! joined by a straight slanted lateral surface. Either radius may be zero
//! (a cone) and both may be equal (a cylinder).

use conic_kernel_math::{Aabb3, Dir3, Point3, Vec3};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{GeomError, Result};

/// A right circular cone frustum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConeFrustum {
    /// Center of the `radius0` face.
    pub base: Point3,
    /// Unit direction from `base` toward the `radius1` face.
    #[serde(deserialize_with = "deserialize_axis")]
    pub axis: Dir3,
    /// Distance along `axis` between the two faces.
    pub height: f64,
    /// Radius of the face at `base`.
    pub radius0: f64,
    /// Radius of the face at `base + height * axis`.
    pub radius1: f64,
}

impl Default for ConeFrustum {
    fn default() -> Self {
        Self {
            base: Point3::origin(),
            axis: Vec3::y_axis(),
            height: 1.0,
            radius0: 0.0,
            radius1: 0.0,
        }
    }
}

/// Read an axis vector of any non-zero length, restoring unit length.
fn deserialize_axis<'de, D>(deserializer: D) -> std::result::Result<Dir3, D::Error>
where
    D: Deserializer<'de>,
{
    let axis = Vec3::deserialize(deserializer)?;
    unit_axis(axis).map_err(de::Error::custom)
}

fn unit_axis(axis: Vec3) -> Result<Dir3> {
    Dir3::try_new(axis, 0.0).ok_or(GeomError::ZeroAxis)
}

/// Slope of the cone tangent to both spheres of a capsule.
///
/// Requires `radius0 <= radius1`. `sin_theta` is the sine of the half-angle
/// of slant, from the similar triangles formed by the radii and the
/// distance between the centers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CapsuleSlope {
    pub dir: Dir3,
    pub length: f64,
    pub sin_theta: f64,
}

impl CapsuleSlope {
    pub(crate) fn new(center0: &Point3, radius0: f64, center1: &Point3, radius1: f64) -> Result<Self> {
        let axis = center1 - center0;
        let length = axis.norm();
        if length == 0.0 {
            return Err(GeomError::DegenerateCapsule);
        }
        Ok(Self {
            dir: Dir3::new_unchecked(axis / length),
            length,
            sin_theta: (radius1 - radius0) / length,
        })
    }

    /// `cos(asin(sin_theta))`, for `|sin_theta| <= 1`.
    pub(crate) fn cos_theta(&self) -> f64 {
        self.sin_theta.asin().cos()
    }
}

impl ConeFrustum {
    /// Create a frustum, normalizing `axis`.
    ///
    /// Fails with [`GeomError::ZeroAxis`] if `axis` has zero length.
    pub fn new(base: Point3, axis: Vec3, height: f64, radius0: f64, radius1: f64) -> Result<Self> {
        Ok(Self {
            base,
            axis: unit_axis(axis)?,
            height,
            radius0,
            radius1,
        })
    }

    /// Build the smallest frustum wrapping a capsule.
    ///
    /// The capsule is the convex hull of a sphere of radius `radius0` at
    /// `center0` and one of radius `radius1` at `center1`. The returned
    /// frustum's lateral surface is tangent to both spheres; its faces lie
    /// on the tangency circles. The smaller sphere always ends up at `base`.
    pub fn from_capsule(center0: Point3, radius0: f64, center1: Point3, radius1: f64) -> Result<Self> {
        if radius0 > radius1 {
            return Self::from_capsule(center1, radius1, center0, radius0);
        }

        let slope = CapsuleSlope::new(&center0, radius0, &center1, radius1)?;
        if slope.sin_theta > 1.0 {
            return Err(GeomError::EnclosedSphere {
                sin_theta: slope.sin_theta,
            });
        }

        let height = slope.length + slope.sin_theta * (radius0 - radius1);
        let base = center0 + slope.dir.as_ref() * (-slope.sin_theta * radius0);
        let cos_theta = slope.cos_theta();
        log::trace!(
            "capsule fit: sin_theta={}, height={}, base={:?}",
            slope.sin_theta,
            height,
            base
        );

        Ok(Self {
            base,
            axis: slope.dir,
            height,
            radius0: radius0 * cos_theta,
            radius1: radius1 * cos_theta,
        })
    }

    /// Replace the axis, normalizing it. A zero-length axis is rejected and
    /// leaves the frustum unchanged.
    pub fn set_axis(&mut self, axis: Vec3) -> Result<()> {
        self.axis = unit_axis(axis)?;
        Ok(())
    }

    /// Center of the `radius1` face: `base + height * axis`.
    pub fn tip(&self) -> Point3 {
        self.base + self.axis.as_ref() * self.height
    }

    /// Overwrite every field with those of `other`.
    pub fn copy_from(&mut self, other: &ConeFrustum) {
        self.clone_from(other);
    }

    /// True if the frustum has no volume: zero height or both radii zero.
    pub fn is_empty(&self) -> bool {
        self.height == 0.0 || (self.radius0 == 0.0 && self.radius1 == 0.0)
    }

    /// Project `p` onto the axis along the normal of the lateral surface.
    ///
    /// Working in the plane spanned by the axis and `p`, the result is where
    /// the line through `p` perpendicular to the slanted side meets the axis.
    /// For a cylinder this is the ordinary orthogonal projection.
    pub fn orthogonal_project(&self, p: &Point3) -> Point3 {
        let axis = self.axis.as_ref();
        let base_to_p = p - self.base;
        let x = base_to_p.dot(axis);
        // Rounding can push the squared radial distance slightly below zero
        let y = (base_to_p.norm_squared() - x * x).max(0.0).sqrt();

        let t = if self.height == 0.0 {
            x
        } else {
            x - y * (self.radius0 - self.radius1) / self.height
        };
        self.base + axis * t
    }

    /// Smallest axis-aligned box containing the frustum.
    ///
    /// A disk of radius `r` perpendicular to unit axis `a` extends
    /// `r * sqrt(1 - a_i^2)` from its center along world axis `i`; the
    /// frustum box is the union of the boxes of its two end disks.
    pub fn bounding_box(&self) -> Aabb3 {
        let a = self.axis.as_ref();
        let extent = Vec3::new(
            (1.0 - a.x * a.x).max(0.0).sqrt(),
            (1.0 - a.y * a.y).max(0.0).sqrt(),
            (1.0 - a.z * a.z).max(0.0).sqrt(),
        );

        let face0 = Aabb3::from_center_half_extents(&self.base, &(extent * self.radius0));
        let face1 = Aabb3::from_center_half_extents(&self.tip(), &(extent * self.radius1));
        face0.union(&face1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    /// Points on the rim of a disk centered at `center`, perpendicular to `axis`.
    fn disk_rim(center: &Point3, axis: &Vec3, radius: f64, samples: usize) -> Vec<Point3> {
        let helper = if axis.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
        let u = axis.cross(&helper).normalize();
        let v = axis.cross(&u);
        (0..samples)
            .map(|i| {
                let theta = 2.0 * PI * i as f64 / samples as f64;
                center + radius * (theta.cos() * u + theta.sin() * v)
            })
            .collect()
    }

    /// Distance in the axial plane from a point on the axis at `a` to the slanted side.
    fn distance_to_side(f: &ConeFrustum, a: f64) -> f64 {
        let dr = f.radius1 - f.radius0;
        (f.height * f.radius0 + dr * a).abs() / (f.height * f.height + dr * dr).sqrt()
    }

    #[test]
    fn test_default() {
        let f = ConeFrustum::default();
        assert_eq!(f.base, Point3::origin());
        assert_eq!(f.axis.into_inner(), Vec3::y());
        assert_eq!(f.height, 1.0);
        assert_eq!(f.radius0, 0.0);
        assert_eq!(f.radius1, 0.0);
        assert!(f.is_empty());
    }

    #[test]
    fn test_new_normalizes_axis() {
        let mut f = ConeFrustum::new(Point3::origin(), Vec3::new(0.0, 0.0, 5.0), 2.0, 1.0, 1.0).unwrap();
        assert_relative_eq!(f.axis.into_inner(), Vec3::z());

        f.set_axis(Vec3::new(3.0, 4.0, 0.0)).unwrap();
        assert_relative_eq!(f.axis.into_inner(), Vec3::new(0.6, 0.8, 0.0));
        assert_relative_eq!(f.tip(), Point3::new(1.2, 1.6, 0.0));
    }

    #[test]
    fn test_zero_axis_rejected() {
        let result = ConeFrustum::new(Point3::origin(), Vec3::zeros(), 2.0, 1.0, 1.0);
        assert_eq!(result, Err(GeomError::ZeroAxis));

        let mut f = ConeFrustum::new(Point3::origin(), Vec3::x(), 2.0, 1.0, 1.0).unwrap();
        assert_eq!(f.set_axis(Vec3::zeros()), Err(GeomError::ZeroAxis));
        assert_eq!(f.axis.into_inner(), Vec3::x());
    }

    #[test]
    fn test_is_empty() {
        let zero_height = ConeFrustum::new(Point3::origin(), Vec3::y(), 0.0, 1.0, 2.0).unwrap();
        assert!(zero_height.is_empty());

        let zero_radii = ConeFrustum::new(Point3::origin(), Vec3::y(), 5.0, 0.0, 0.0).unwrap();
        assert!(zero_radii.is_empty());

        let cone = ConeFrustum::new(Point3::origin(), Vec3::y(), 5.0, 0.0, 1.0).unwrap();
        assert!(!cone.is_empty());
    }

    #[test]
    fn test_equality_is_exact() {
        let a = ConeFrustum::new(Point3::new(1.0, 2.0, 3.0), Vec3::x(), 4.0, 0.5, 1.5).unwrap();
        let b = a.clone();
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);

        let eps = 1e-12;
        let mut c = a.clone();
        c.base.z += eps;
        assert_ne!(a, c);

        let mut c = a.clone();
        c.axis = Dir3::new_unchecked(Vec3::new(1.0, eps, 0.0));
        assert_ne!(a, c);

        let mut c = a.clone();
        c.height += eps;
        assert_ne!(a, c);

        let mut c = a.clone();
        c.radius0 += eps;
        assert_ne!(a, c);

        let mut c = a.clone();
        c.radius1 -= eps;
        assert_ne!(a, c);
    }

    #[test]
    fn test_copy_from() {
        let src = ConeFrustum::new(Point3::new(1.0, 0.0, 0.0), Vec3::z(), 3.0, 1.0, 2.0).unwrap();
        let mut dst = ConeFrustum::default();
        dst.copy_from(&src);
        assert_eq!(dst, src);

        // The copy is independent of its source
        dst.base.x = 10.0;
        assert_eq!(src.base.x, 1.0);
    }

    #[test]
    fn test_from_capsule_values() {
        let f = ConeFrustum::from_capsule(Point3::origin(), 1.0, Point3::new(0.0, 10.0, 0.0), 2.0)
            .unwrap();
        let cos_theta = 0.99_f64.sqrt();
        assert_relative_eq!(f.axis.into_inner(), Vec3::y());
        assert!((f.height - 9.9).abs() < 1e-12);
        assert_relative_eq!(f.base, Point3::new(0.0, -0.1, 0.0), epsilon = 1e-12);
        assert!((f.radius0 - cos_theta).abs() < 1e-12);
        assert!((f.radius1 - 2.0 * cos_theta).abs() < 1e-12);
    }

    #[test]
    fn test_from_capsule_equal_radii_is_cylinder() {
        let f = ConeFrustum::from_capsule(Point3::new(1.0, 1.0, 1.0), 0.5, Point3::new(1.0, 1.0, 5.0), 0.5)
            .unwrap();
        assert_eq!(f.base, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(f.height, 4.0);
        assert_eq!(f.radius0, 0.5);
        assert_eq!(f.radius1, 0.5);
    }

    #[test]
    fn test_from_capsule_is_tangent_to_both_spheres() {
        let c0 = Point3::new(1.0, -2.0, 0.5);
        let c1 = Point3::new(4.0, 3.0, -1.0);
        let (r0, r1) = (0.75, 2.0);
        let f = ConeFrustum::from_capsule(c0, r0, c1, r1).unwrap();

        let a0 = (c0 - f.base).dot(f.axis.as_ref());
        let a1 = (c1 - f.base).dot(f.axis.as_ref());
        assert!((distance_to_side(&f, a0) - r0).abs() < 1e-10);
        assert!((distance_to_side(&f, a1) - r1).abs() < 1e-10);
    }

    #[test]
    fn test_from_capsule_symmetric() {
        let c0 = Point3::new(0.0, 1.0, 2.0);
        let c1 = Point3::new(3.0, -1.0, 2.0);
        let a = ConeFrustum::from_capsule(c0, 2.0, c1, 0.5).unwrap();
        let b = ConeFrustum::from_capsule(c1, 0.5, c0, 2.0).unwrap();
        assert_eq!(a, b);
        // Smaller sphere is placed at the base
        assert!(a.radius0 <= a.radius1);
        assert!((a.axis.into_inner() - (c0 - c1).normalize()).norm() < 1e-12);
    }

    #[test]
    fn test_from_capsule_degenerate() {
        let c = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(
            ConeFrustum::from_capsule(c, 1.0, c, 2.0),
            Err(GeomError::DegenerateCapsule)
        );
    }

    #[test]
    fn test_from_capsule_enclosed_sphere() {
        let result = ConeFrustum::from_capsule(Point3::origin(), 0.5, Point3::new(1.0, 0.0, 0.0), 3.0);
        assert!(matches!(result, Err(GeomError::EnclosedSphere { .. })));
    }

    #[test]
    fn test_orthogonal_project_cylinder() {
        let f = ConeFrustum::new(Point3::new(0.0, 1.0, 0.0), Vec3::y(), 10.0, 2.0, 2.0).unwrap();
        let p = f.orthogonal_project(&Point3::new(3.0, 4.0, -1.0));
        assert_relative_eq!(p, Point3::new(0.0, 4.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_orthogonal_project_perpendicular_to_side() {
        let f = ConeFrustum::new(Point3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0), 8.0, 1.0, 3.0).unwrap();
        let axis = f.axis.into_inner();
        for p in [
            Point3::new(4.0, 0.0, 2.0),
            Point3::new(-1.0, 3.0, 1.0),
            Point3::new(6.0, 6.5, -3.0),
        ] {
            let proj = f.orthogonal_project(&p);

            // Projection lies on the axis line
            let from_base = proj - f.base;
            assert!(from_base.cross(&axis).norm() < 1e-10);

            // And p - proj is perpendicular to the slanted side in p's axial plane
            let to_p = p - f.base;
            let radial = (to_p - to_p.dot(&axis) * axis).normalize();
            let side = f.height * axis + (f.radius1 - f.radius0) * radial;
            assert!((p - proj).dot(&side).abs() < 1e-10);
        }
    }

    #[test]
    fn test_orthogonal_project_on_axis() {
        // Rounding must not produce NaN for points on the axis
        let f = ConeFrustum::new(Point3::new(0.1, 0.2, 0.3), Vec3::new(0.3, 0.7, 0.1), 5.0, 1.0, 0.2).unwrap();
        let p = f.base + f.axis.as_ref() * 2.7;
        let proj = f.orthogonal_project(&p);
        assert!(proj.coords.iter().all(|c| c.is_finite()));
        assert_relative_eq!(proj, p, epsilon = 1e-6);
    }

    #[test]
    fn test_orthogonal_project_zero_height() {
        let f = ConeFrustum::new(Point3::origin(), Vec3::z(), 0.0, 1.0, 2.0).unwrap();
        let proj = f.orthogonal_project(&Point3::new(1.0, 1.0, 3.0));
        assert_relative_eq!(proj, Point3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_bounding_box_aligned() {
        let f = ConeFrustum::new(Point3::origin(), Vec3::y(), 10.0, 1.0, 2.0).unwrap();
        let bbox = f.bounding_box();
        assert_relative_eq!(bbox.min, Point3::new(-2.0, 0.0, -2.0));
        assert_relative_eq!(bbox.max, Point3::new(2.0, 10.0, 2.0));
    }

    #[test]
    fn test_bounding_box_contains_end_disks() {
        let frusta = [
            ConeFrustum::new(Point3::new(1.0, -2.0, 3.0), Vec3::new(1.0, 2.0, 3.0), 7.0, 0.5, 2.5).unwrap(),
            ConeFrustum::new(Point3::origin(), Vec3::new(-1.0, 0.0, 1.0), 3.0, 4.0, 1.0).unwrap(),
            ConeFrustum::new(Point3::new(5.0, 5.0, 5.0), Vec3::new(0.1, -1.0, 0.05), 2.0, 1.0, 1.0).unwrap(),
        ];
        for f in &frusta {
            let bbox = f.bounding_box();
            let axis = f.axis.into_inner();
            let mut slack = bbox;
            slack.min -= Vec3::repeat(1e-9);
            slack.max += Vec3::repeat(1e-9);

            assert!(slack.contains_point(&f.base));
            assert!(slack.contains_point(&f.tip()));
            for p in disk_rim(&f.base, &axis, f.radius0, 64)
                .iter()
                .chain(disk_rim(&f.tip(), &axis, f.radius1, 64).iter())
            {
                assert!(slack.contains_point(p), "{:?} outside {:?}", p, bbox);
            }
        }
    }

    #[test]
    fn test_bounding_box_is_tight() {
        // Axis along X: the disks span exactly ±r in Y and Z
        let f = ConeFrustum::new(Point3::origin(), Vec3::x(), 4.0, 3.0, 1.0).unwrap();
        let bbox = f.bounding_box();
        assert_relative_eq!(bbox.min, Point3::new(0.0, -3.0, -3.0));
        assert_relative_eq!(bbox.max, Point3::new(4.0, 3.0, 3.0));
    }

    #[test]
    fn test_serde_roundtrip() {
        let f = ConeFrustum::new(Point3::new(1.0, 2.0, 3.0), Vec3::z(), 4.0, 0.5, 1.5).unwrap();
        let json = serde_json::to_string(&f).unwrap();
        let back: ConeFrustum = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn test_deserialize_normalizes_axis() {
        let json = r#"{"base":[0.0,0.0,0.0],"axis":[0.0,5.0,0.0],"height":1.0,"radius0":1.0,"radius1":2.0}"#;
        let f: ConeFrustum = serde_json::from_str(json).unwrap();
        assert_relative_eq!(f.axis.norm(), 1.0);
        assert_relative_eq!(f.tip(), Point3::new(0.0, 1.0, 0.0));

        let bbox = f.bounding_box();
        assert_relative_eq!(bbox.min, Point3::new(-2.0, 0.0, -2.0));
        assert_relative_eq!(bbox.max, Point3::new(2.0, 1.0, 2.0));
    }

    #[test]
    fn test_deserialize_rejects_zero_axis() {
        let json = r#"{"base":[0.0,0.0,0.0],"axis":[0.0,0.0,0.0],"height":1.0,"radius0":1.0,"radius1":2.0}"#;
        let err = serde_json::from_str::<ConeFrustum>(json).unwrap_err();
        assert!(err.to_string().contains("zero length"));
    }
}
