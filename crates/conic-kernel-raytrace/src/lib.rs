#![warn(missing_docs)]

//! Analytic ray tracing against conic kernel primitives.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray representation with origin and direction
//! - [`FrustumHit`] - Intersection result with ray parameter and point
//! - [`intersect`] - Ray-primitive intersection algorithms
//!
//! # Example
//!
//! ```
//! use conic_kernel_geom::ConeFrustum;
//! use conic_kernel_math::{Point3, Vec3};
//! use conic_kernel_raytrace::Ray;
//!
//! let frustum = ConeFrustum::new(Point3::origin(), Vec3::y(), 10.0, 2.0, 2.0).unwrap();
//! let ray = Ray::new(Point3::new(-10.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
//!
//! let hit = ray.intersect_cone_frustum(&frustum).unwrap();
//! assert!((hit.x + 2.0).abs() < 1e-10);
//! ```

mod ray;
pub mod intersect;

pub use intersect::{intersect_cone_frustum, FrustumHit};
pub use ray::Ray;
