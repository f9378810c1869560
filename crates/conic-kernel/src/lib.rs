#![warn(missing_docs)]

//! Cone frustum geometry kernel.
//!
//! Re-exports the math, frustum and ray tracing crates so consumers can
//! depend on a single crate.
//!
//! # Example
//!
//! ```
//! use conic_kernel::{ConeFrustum, Point3, Ray, Vec3};
//!
//! // Capsule from a unit sphere at the origin to a unit sphere at y = 4
//! let frustum = ConeFrustum::from_capsule(
//!     Point3::origin(), 1.0,
//!     Point3::new(0.0, 4.0, 0.0), 1.0,
//! ).unwrap();
//! assert!((frustum.height - 4.0).abs() < 1e-12);
//!
//! let ray = Ray::new(Point3::new(5.0, 2.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
//! let hit = ray.intersect_cone_frustum(&frustum).unwrap();
//! assert!((hit.x - 1.0).abs() < 1e-12);
//! ```

pub use conic_kernel_geom;
pub use conic_kernel_math;
pub use conic_kernel_raytrace;

pub use conic_kernel_geom::{ConeFrustum, GeomError, Result, CUBE_VERTEX_COUNT, PRISM_VERTEX_COUNT};
pub use conic_kernel_math::{flatten_f32, Aabb3, Dir3, Point3, Transform, Vec3};
pub use conic_kernel_raytrace::{intersect_cone_frustum, FrustumHit, Ray};
