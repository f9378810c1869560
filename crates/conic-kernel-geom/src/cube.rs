//! Oriented bounding cubes for frusta and capsules.
//!
//! Both builders emit non-indexed triangle soups as flat `f32` coordinate
//! arrays (`[x0, y0, z0, x1, ...]`), ready for upload as a position buffer.
//! Coordinates are expressed relative to a caller-supplied `origin`.

use std::f64::consts::PI;

use conic_kernel_math::{flatten_f32, Point3, Transform, Vec3};

use crate::error::Result;
use crate::frustum::{CapsuleSlope, ConeFrustum};

/// Number of vertices emitted by [`ConeFrustum::optimised_bounding_cube`].
pub const CUBE_VERTEX_COUNT: usize = 36;

/// Number of vertices emitted by [`ConeFrustum::optimised_downscaling_bounding_cube`].
pub const PRISM_VERTEX_COUNT: usize = PRISM_TRIANGLES.len();

/// Box faces as `(u, v, w, u_sign, v_sign, w_sign)`: corner `(x, y)` of a
/// face maps to `p[u] = x * u_sign`, `p[v] = y * v_sign`, `p[w] = w_sign`.
/// Order is +X, -X, +Y, -Y, +Z, -Z.
const BOX_FACES: [(usize, usize, usize, f64, f64, f64); 6] = [
    (2, 1, 0, -1.0, -1.0, 1.0),
    (2, 1, 0, 1.0, -1.0, -1.0),
    (0, 2, 1, 1.0, 1.0, 1.0),
    (0, 2, 1, 1.0, -1.0, -1.0),
    (0, 1, 2, 1.0, -1.0, 1.0),
    (0, 1, 2, -1.0, -1.0, -1.0),
];

/// Prism template: smaller face, intermediate face, bigger face.
const PRISM_FACES: [[f64; 3]; 12] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
];

#[rustfmt::skip]
const PRISM_TRIANGLES: [usize; 60] = [
    // Small face
    0, 1, 3,   0, 3, 2,
    // Small to intermediate
    6, 4, 0,   6, 0, 2,
    7, 6, 2,   7, 2, 3,
    5, 7, 3,   5, 3, 1,
    4, 5, 1,   4, 1, 0,
    // Intermediate to big
    10, 8, 4,  10, 4, 6,
    11, 10, 6, 11, 6, 7,
    9, 11, 7,  9, 7, 5,
    8, 9, 5,   8, 5, 4,
    // Big face
    9, 8, 10,  9, 10, 11,
];

/// The 2x2x2 box centered at the origin, two outward-facing triangles per face.
fn box_triangles() -> Vec<Point3> {
    let corners = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)];
    let mut out = Vec::with_capacity(CUBE_VERTEX_COUNT);
    for &(u, v, w, u_sign, v_sign, w_sign) in &BOX_FACES {
        let face: Vec<Point3> = corners
            .iter()
            .map(|&(x, y)| {
                let mut p = Point3::origin();
                p[u] = x * u_sign;
                p[v] = y * v_sign;
                p[w] = w_sign;
                p
            })
            .collect();
        out.extend([0, 2, 1, 2, 3, 1].iter().map(|&i| face[i]));
    }
    out
}

impl ConeFrustum {
    /// Oriented box around the frustum, as 12 triangles.
    ///
    /// The box has the frustum's height and the larger radius as its half
    /// width, and is centered halfway along the axis. When the axis is
    /// anti-parallel to +Y no rotation is applied; the box is symmetric so
    /// the result is still correct.
    #[deprecated(note = "use `ConeFrustum::optimised_downscaling_bounding_cube` instead")]
    pub fn optimised_bounding_cube(&self, origin: &Point3) -> Vec<f32> {
        let r = self.radius0.max(self.radius1);
        let axis = self.axis.into_inner();

        let mut transform = Transform::scale(r, self.height / 2.0, r);
        if let Some(rotation) = Transform::rotation_from_y(&axis) {
            transform = rotation.then(&transform);
        }
        let center = self.base + axis * (self.height / 2.0);
        transform = Transform::translation_vec(&(center - origin)).then(&transform);

        let mut positions = box_triangles();
        transform.apply_points(&mut positions);
        flatten_f32(&positions)
    }

    /// Tight bounding prism for a capsule that will later be shrunk along its axis.
    ///
    /// Downstream consumers scale the capsule's radii by `min_scale` before
    /// rasterizing; the prism is shaped so it still bounds the shrunk cone.
    /// It has three tiers of 4 vertices each: the small face at the tangency
    /// circle of the smaller sphere, an intermediate ring at the unscaled
    /// frustum height, and the big face at the shrunk frustum height.
    ///
    /// Returns 20 triangles (60 vertices). Coordinates are relative to
    /// `origin`; with `None` the prism is left centered at the origin.
    pub fn optimised_downscaling_bounding_cube(
        center0: Point3,
        radius0: f64,
        center1: Point3,
        radius1: f64,
        origin: Option<Point3>,
        min_scale: f64,
    ) -> Result<Vec<f32>> {
        if radius0 > radius1 {
            return Self::optimised_downscaling_bounding_cube(
                center1, radius1, center0, radius0, origin, min_scale,
            );
        }

        let slope = CapsuleSlope::new(&center0, radius0, &center1, radius1)?;
        let sin_theta = slope.sin_theta;

        if sin_theta.abs() >= 0.9999 / min_scale {
            // Shrinking would invert the cone: collapse to the midpoint
            let mut mid = center0 + (center1 - center0) * 0.5;
            if let Some(origin) = origin {
                mid -= origin.coords;
            }
            log::debug!(
                "capsule collapses under min_scale {} (sin_theta {}), emitting point at {:?}",
                min_scale,
                sin_theta,
                mid
            );
            return Ok(flatten_f32(&[mid; PRISM_VERTEX_COUNT]));
        } else if sin_theta.abs() > 1.0 {
            log::debug!(
                "sin_theta {} out of range, retrying with radii pre-scaled by {}",
                sin_theta,
                min_scale
            );
            return Self::optimised_downscaling_bounding_cube(
                center0,
                min_scale * radius0,
                center1,
                min_scale * radius1,
                origin,
                1.0,
            );
        }

        let cos_theta = slope.cos_theta();
        let height = slope.length + sin_theta * (radius0 - (min_scale * min_scale) * radius1);
        let unscaled_height = slope.length + sin_theta * (radius0 - radius1);
        let dir = slope.dir.into_inner();
        let base = center0 + dir * (-sin_theta * radius0);

        let r0 = radius0 * cos_theta;
        let r1 = radius1 * cos_theta;

        let mut faces = PRISM_FACES.map(|[x, y, z]| Point3::new(x, y, z));

        let small = if r1 > 0.0 { r0 / r1 } else { 1.0 };
        for p in &mut faces[0..4] {
            p.x *= small;
            p.z *= small;
        }

        let big = if r1 > 0.0 {
            (min_scale * sin_theta).asin().cos() * radius1 * min_scale / r1
        } else {
            1.0
        };
        for p in &mut faces[8..12] {
            p.x *= big;
            p.z *= big;
        }

        let new_y = 2.0 * unscaled_height / height - 1.0;
        for p in &mut faces[4..8] {
            p.y = new_y;
        }

        let mut transform = Transform::scale(r1, height / 2.0, r1);
        match Transform::rotation_from_y(&dir) {
            Some(rotation) => transform = rotation.then(&transform),
            None if Vec3::y().dot(&dir) < 0.0 => {
                log::debug!("capsule axis anti-parallel to +Y, flipping about Z");
                transform = Transform::rotation_z(PI).then(&transform);
            }
            None => {}
        }
        if let Some(origin) = origin {
            let offset = base + dir * (height / 2.0) - origin;
            transform = Transform::translation_vec(&offset).then(&transform);
        }

        let mut positions: Vec<Point3> = PRISM_TRIANGLES.iter().map(|&i| faces[i]).collect();
        transform.apply_points(&mut positions);
        Ok(flatten_f32(&positions))
    }
}
