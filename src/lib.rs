//! # Haze
//!
//! Smoothing and interpolation of per-vertex data on triangle meshes, such
//! as cortical thickness on a brain surface.
//!
//! Haze provides three stateless kernels:
//!
//! - **Neighbor smoothing**: iterated neighbor averaging over any adjacency relation
//! - **Gaussian smoothing**: FWHM-parameterized kernel over geodesic neighborhoods
//! - **Triangle interpolation**: inverse-distance weighting of vertex data at
//!   arbitrary points inside mesh triangles
//!
//! Missing measurements are marked with [`field::MISSING`] (a NaN) and are
//! never averaged into valid data.
//!
//! ## Quick Start
//!
//! ```
//! use haze::prelude::*;
//!
//! // 1-ring adjacency of two triangles sharing an edge
//! let adj = Adjacency::from_triangles(4, &[[0, 1, 2], [0, 2, 3]]).unwrap();
//! let thickness = vec![2.5, 3.0, MISSING, 2.0];
//!
//! let options = NeighborSmoothOptions::default().with_iterations(3);
//! let smoothed = smooth_neighbors(&adj, &thickness, &options).unwrap();
//!
//! assert!(is_missing(smoothed[2]));
//! assert!(smoothed[0].is_finite());
//! ```
//!
//! ## Gaussian Smoothing
//!
//! ```
//! use haze::prelude::*;
//!
//! // Geodesic neighborhoods are computed upstream; here by hand.
//! let neigh = GeodesicNeighborhood::new(
//!     vec![vec![1], vec![0]],
//!     vec![vec![1.0], vec![1.0]],
//! )
//! .unwrap()
//! .with_self();
//!
//! let options = GaussianSmoothOptions::default().with_fwhm(2.0);
//! let smoothed = smooth_gaussian(&neigh, &[0.0, 1.0], &options).unwrap();
//! assert!((smoothed[0] + smoothed[1] - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod field;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use haze::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        fwhm_to_gstd, interpolate_triangles, smooth_gaussian, smooth_neighbors,
        GaussianSmoothOptions, InterpolationOptions, NeighborSmoothOptions, Progress,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::field::{is_missing, MISSING};
    pub use crate::mesh::{Adjacency, GeodesicNeighborhood};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
