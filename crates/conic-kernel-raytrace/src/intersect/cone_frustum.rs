//! Ray-cone frustum intersection (quadratic equation).

use conic_kernel_geom::ConeFrustum;

use super::FrustumHit;
use crate::Ray;

/// Intersect a ray with the lateral surface of a cone frustum.
///
/// Returns the crossing with the smallest `t >= 0` whose axial coordinate
/// lies in `[0, height]`, or `None`. The end caps are not tested.
///
/// A point `P` at axial coordinate `a` lies on the infinite cone through
/// the frustum's side when its squared distance from the axis equals
/// `(radius0 + a * dr / height)^2`. Substituting `P = origin + t * direction`
/// gives `c2 * t^2 + 2 * c1 * t + c0 = 0`.
///
/// When `direction` is parallel to a generator of the cone, `c2` vanishes
/// and the equation is linear: `2 * c1 * t + c0 = 0`, so `t = -c0 / (2 * c1)`.
/// The form `-2 * c0 / c1` is not a root of that equation and puts the point
/// off the surface.
pub fn intersect_cone_frustum(ray: &Ray, frustum: &ConeFrustum) -> Option<FrustumHit> {
    if frustum.height == 0.0 {
        return None;
    }

    let axis = frustum.axis.as_ref();
    let v = &ray.direction;
    let d = ray.origin - frustum.base;

    let delta_r = frustum.radius1 - frustum.radius0;
    let r = 1.0 + (delta_r / frustum.height).powi(2);
    let big_r = frustum.radius0 * delta_r / frustum.height;

    let d_dot_a = d.dot(axis);
    let d_dot_d = d.dot(&d);
    let v_dot_a = v.dot(axis);
    let v_dot_d = v.dot(&d);
    let v_dot_v = v.dot(v);

    let c0 = frustum.radius0 * frustum.radius0 + 2.0 * big_r * d_dot_a + r * d_dot_a * d_dot_a
        - d_dot_d;
    let c1 = big_r * v_dot_a + r * d_dot_a * v_dot_a - v_dot_d;
    let c2 = r * v_dot_a * v_dot_a - v_dot_v;

    let accept = |t: f64| {
        if t < 0.0 {
            return None;
        }
        let u = d + v * t;
        let axial = axis.dot(&u);
        (0.0..=frustum.height).contains(&axial).then(|| FrustumHit {
            t,
            point: frustum.base + u,
        })
    };

    if c2 != 0.0 {
        let discr = c1 * c1 - c2 * c0;
        if discr < 0.0 {
            None
        } else if discr == 0.0 {
            accept(-c1 / c2)
        } else {
            let root = discr.sqrt();
            let t0 = (-c1 - root) / c2;
            let t1 = (-c1 + root) / c2;
            match (accept(t0), accept(t1)) {
                (Some(h0), Some(h1)) => Some(if t0 > t1 { h1 } else { h0 }),
                (h0, h1) => h0.or(h1),
            }
        }
    } else if c1 != 0.0 {
        // Direction parallel to a generator: root of 2 * c1 * t + c0 = 0
        accept(-c0 / (2.0 * c1))
    } else {
        None
    }
}
