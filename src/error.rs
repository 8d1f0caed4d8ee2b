//! Error types for haze.
//!
//! Every kernel validates its inputs up front and reports contract
//! violations through [`MeshError`] before producing any output.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur when running a kernel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Two arrays that must be parallel have different lengths.
    #[error("{what}: expected length {expected}, got {actual}")]
    LengthMismatch {
        /// Which pair of inputs disagrees.
        what: &'static str,
        /// The length implied by the other input.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// A neighbor list or triangle references a vertex that does not exist.
    #[error("element {element} references invalid vertex index {index} (vertex count {bound})")]
    InvalidVertexIndex {
        /// The vertex (or query row) holding the bad reference.
        element: usize,
        /// The invalid vertex index.
        index: usize,
        /// Number of valid vertices.
        bound: usize,
    },

    /// A geodesic distance is negative or NaN.
    #[error("vertex {vertex} has invalid geodesic distance {value} at neighbor position {position}")]
    InvalidDistance {
        /// The vertex whose neighborhood is invalid.
        vertex: usize,
        /// Position within the neighbor list.
        position: usize,
        /// The offending distance.
        value: f64,
    },

    /// A coordinate component is NaN or infinite.
    #[error("{what} {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Which coordinate array holds the point.
        what: &'static str,
        /// Index of the point.
        index: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(MeshError::LengthMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}
