//! Mesh topology inputs for the kernels.
//!
//! The kernels do not own a mesh. They consume the two relations they need:
//!
//! - [`Adjacency`] - per-vertex neighbor lists for neighbor averaging
//! - [`GeodesicNeighborhood`] - per-vertex neighbor lists with geodesic
//!   distances, for Gaussian smoothing
//!
//! Mesh vertex coordinates are plain `nalgebra::Point3<f64>` slices.

mod adjacency;
mod neighborhood;

pub use adjacency::Adjacency;
pub use neighborhood::GeodesicNeighborhood;
