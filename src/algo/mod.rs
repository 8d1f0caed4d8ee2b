//! Scalar-field kernels.
//!
//! - **Neighbor smoothing** ([`smooth`]): iterative averaging over an
//!   arbitrary adjacency, with missing-value propagation
//! - **Gaussian smoothing** ([`gaussian`]): FWHM-parameterized Gaussian
//!   weights over truncated geodesic neighborhoods
//! - **Interpolation** ([`interpolate`]): inverse-distance weighting of
//!   vertex data at points inside mesh triangles
//!
//! All kernels are pure functions: they borrow their inputs, validate them,
//! and return a freshly allocated field.

pub mod gaussian;
pub mod interpolate;
mod progress;
pub mod smooth;

pub use gaussian::{
    fwhm_to_gstd, gauss_weights, smooth_gaussian, spatial_filter, GaussianSmoothOptions,
};
pub use interpolate::{interpolate_triangles, InterpolationOptions};
pub use progress::Progress;
pub use smooth::{smooth_neighbors, smooth_neighbors_with_progress, NeighborSmoothOptions};
