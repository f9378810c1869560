#![warn(missing_docs)]

//! Cone frustum primitive for the conic kernel.
//!
//! Provides [`ConeFrustum`], a right circular cone with its tip cut off,
//! together with its derived geometry:
//!
//! - [`ConeFrustum::from_capsule`] - the frustum tangent to two spheres
//! - [`ConeFrustum::orthogonal_project`] - projection onto the axis along the surface normal
//! - [`ConeFrustum::bounding_box`] - tight axis-aligned bounds
//! - [`ConeFrustum::optimised_downscaling_bounding_cube`] - oriented bounding prism for a capsule

mod cube;
mod error;
mod frustum;

pub use cube::{CUBE_VERTEX_COUNT, PRISM_VERTEX_COUNT};
pub use error::{GeomError, Result};
pub use frustum::ConeFrustum;
