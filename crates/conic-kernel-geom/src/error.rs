//! Error types for frustum construction.

use thiserror::Error;

/// Errors that can occur while fitting a frustum or bounding volume to a capsule.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeomError {
    /// The two capsule centers coincide, so there is no axis.
    #[error("degenerate capsule: centers coincide")]
    DegenerateCapsule,

    /// An axis vector of zero length cannot be normalized.
    #[error("frustum axis has zero length")]
    ZeroAxis,

    /// One capsule sphere encloses the other; no tangent cone exists.
    #[error("capsule sphere is enclosed by the other (sin theta = {sin_theta})")]
    EnclosedSphere {
        /// Sine of the would-be half-angle of slant (greater than 1).
        sin_theta: f64,
    },
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeomError>;
