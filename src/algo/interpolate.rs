//! Inverse-distance-weighted interpolation of per-vertex data inside triangles.
//!
//! Given query points and, for each one, the mesh triangle that contains it
//! (point location happens upstream), the interpolated value is
//!
//! ```text
//! r_i = d_i / (d_1 + d_2 + d_3)
//! w_i = r_i^(-β)
//! value = Σ w_i * data[v_i] / Σ w_i
//! ```
//!
//! where `d_i` is the Euclidean distance from the query to triangle vertex
//! `v_i`. A query sitting exactly on a vertex takes that vertex's value.
//!
//! # Example
//!
//! ```
//! use haze::algo::interpolate::{interpolate_triangles, InterpolationOptions};
//! use nalgebra::Point3;
//!
//! let mesh = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let data = vec![1.0, 2.0, 3.0];
//! let queries = vec![Point3::new(1.0, 0.0, 0.0), Point3::new(0.2, 0.2, 0.0)];
//! let triangles = vec![[0, 1, 2]; 2];
//!
//! let values = interpolate_triangles(
//!     &queries, &mesh, &triangles, &data, &InterpolationOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(values[0], 2.0);
//! assert!(values[1] > 1.0 && values[1] < 2.0);
//! ```

use nalgebra::Point3;
use rayon::prelude::*;

use crate::error::{MeshError, Result};

/// Options for triangle interpolation.
#[derive(Debug, Clone)]
pub struct InterpolationOptions {
    /// Inverse-distance weighting exponent. Typically between 1.0 and 2.0;
    /// larger values favor the nearest vertex more strongly.
    pub beta: f64,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for InterpolationOptions {
    fn default() -> Self {
        Self {
            beta: 1.0,
            parallel: true,
        }
    }
}

impl InterpolationOptions {
    /// Set the weighting exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.beta.is_finite() && self.beta > 0.0) {
            return Err(MeshError::invalid_param(
                "beta",
                self.beta,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}

/// How a query value was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Sample {
    /// The query coincides with (or is numerically on top of) a vertex.
    Vertex(f64),
    /// Regular inverse-distance weighted mean.
    Weighted(f64),
}

impl Sample {
    fn value(self) -> f64 {
        match self {
            Sample::Vertex(v) | Sample::Weighted(v) => v,
        }
    }
}

/// Interpolate per-vertex data at query points inside mesh triangles.
///
/// # Arguments
///
/// * `query_coords` - The `n` points to interpolate at
/// * `mesh_coords` - The `m` mesh vertex positions
/// * `triangles` - For each query, the three vertex indices of its enclosing triangle
/// * `vertex_data` - One value per mesh vertex
/// * `options` - Weighting exponent and execution mode
///
/// # Returns
///
/// One value per query. Missing vertex data propagates as a missing
/// result unless the query lies exactly on a non-missing vertex.
///
/// # Errors
///
/// Fails if `triangles` is not parallel to `query_coords`, if `vertex_data`
/// is not parallel to `mesh_coords`, if a triangle index is out of range, if
/// any coordinate is NaN or infinite, or if `beta` is not positive and finite.
pub fn interpolate_triangles(
    query_coords: &[Point3<f64>],
    mesh_coords: &[Point3<f64>],
    triangles: &[[usize; 3]],
    vertex_data: &[f64],
    options: &InterpolationOptions,
) -> Result<Vec<f64>> {
    options.validate()?;
    MeshError::check_len("triangles vs query coordinates", query_coords.len(), triangles.len())?;
    MeshError::check_len("vertex data vs mesh coordinates", mesh_coords.len(), vertex_data.len())?;

    check_finite("query", query_coords)?;
    check_finite("mesh vertex", mesh_coords)?;

    let num_vertices = mesh_coords.len();
    for (row, tri) in triangles.iter().enumerate() {
        if let Some(&bad) = tri.iter().find(|&&v| v >= num_vertices) {
            return Err(MeshError::InvalidVertexIndex {
                element: row,
                index: bad,
                bound: num_vertices,
            });
        }
    }

    let compute_query = |(q, tri): (&Point3<f64>, &[usize; 3])| {
        interpolate_point(q, mesh_coords, tri, vertex_data, options.beta)
    };

    let samples: Vec<Sample> = if options.parallel {
        query_coords
            .par_iter()
            .zip(triangles.par_iter())
            .map(compute_query)
            .collect()
    } else {
        query_coords.iter().zip(triangles).map(compute_query).collect()
    };

    let on_vertex = samples
        .iter()
        .filter(|s| matches!(s, Sample::Vertex(_)))
        .count();
    log::debug!(
        "triangle interpolation: {} queries over {} vertices (beta={}, {} on a vertex)",
        query_coords.len(),
        num_vertices,
        options.beta,
        on_vertex
    );

    Ok(samples.into_iter().map(Sample::value).collect())
}

fn check_finite(what: &'static str, points: &[Point3<f64>]) -> Result<()> {
    match points.iter().position(|p| !p.coords.iter().all(|c| c.is_finite())) {
        Some(index) => Err(MeshError::NonFiniteCoordinate { what, index }),
        None => Ok(()),
    }
}

fn interpolate_point(
    query: &Point3<f64>,
    mesh_coords: &[Point3<f64>],
    tri: &[usize; 3],
    vertex_data: &[f64],
    beta: f64,
) -> Sample {
    let dists = tri.map(|v| (mesh_coords[v] - *query).norm());

    if let Some(k) = dists.iter().position(|&d| d == 0.0) {
        return Sample::Vertex(vertex_data[tri[k]]);
    }

    let total = dists[0] + dists[1] + dists[2];
    let weights = dists.map(|d| (d / total).powf(-beta));
    let weight_sum = weights[0] + weights[1] + weights[2];

    // r^-beta overflows for queries within rounding distance of a vertex.
    if !weight_sum.is_finite() {
        let nearest = (1..3).fold(0, |best, k| if dists[k] < dists[best] { k } else { best });
        return Sample::Vertex(vertex_data[tri[nearest]]);
    }

    let weighted: f64 = weights
        .iter()
        .zip(tri)
        .map(|(w, &v)| w * vertex_data[v])
        .sum();
    Sample::Weighted(weighted / weight_sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{is_missing, MISSING};

    fn create_equilateral_triangle() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 3.0_f64.sqrt() / 2.0, 0.0),
        ]
    }

    fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
        Point3::from((points[0].coords + points[1].coords + points[2].coords) / 3.0)
    }

    #[test]
    fn test_query_on_vertex_is_exact() {
        let mesh = create_equilateral_triangle();
        let data = [0.1, 0.7, 123.456];

        for beta in [0.5, 1.0, 1.5, 2.0, 5.0] {
            let options = InterpolationOptions::default().with_beta(beta);
            let values =
                interpolate_triangles(&mesh, &mesh, &[[0, 1, 2]; 3], &data, &options).unwrap();
            assert_eq!(values, data.to_vec(), "beta {}", beta);
        }
    }

    #[test]
    fn test_centroid_of_constant_data() {
        let mesh = create_equilateral_triangle();
        let query = [centroid(&mesh)];
        let data = [4.2; 3];

        for beta in [1.0, 1.5, 2.0] {
            let options = InterpolationOptions::default().with_beta(beta);
            let values = interpolate_triangles(&query, &mesh, &[[0, 1, 2]], &data, &options).unwrap();
            assert!((values[0] - 4.2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_centroid_of_equilateral_is_mean() {
        let mesh = create_equilateral_triangle();
        let query = [centroid(&mesh)];
        let data = [1.0, 2.0, 6.0];

        let values = interpolate_triangles(
            &query,
            &mesh,
            &[[0, 1, 2]],
            &data,
            &InterpolationOptions::default(),
        )
        .unwrap();
        assert!((values[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_larger_beta_favors_nearest_vertex() {
        let mesh = create_equilateral_triangle();
        let query = [Point3::new(0.1, 0.05, 0.0)];
        let data = [0.0, 1.0, 1.0];

        let soft = interpolate_triangles(
            &query,
            &mesh,
            &[[0, 1, 2]],
            &data,
            &InterpolationOptions::default().with_beta(1.0),
        )
        .unwrap()[0];
        let sharp = interpolate_triangles(
            &query,
            &mesh,
            &[[0, 1, 2]],
            &data,
            &InterpolationOptions::default().with_beta(2.0),
        )
        .unwrap()[0];

        assert!(soft > 0.0 && soft < 1.0);
        assert!(sharp < soft, "beta 2 ({}) should be closer to 0 than beta 1 ({})", sharp, soft);
    }

    #[test]
    fn test_weight_overflow_uses_nearest_vertex() {
        let mesh = create_equilateral_triangle();
        // Non-zero distance, but r^-beta overflows.
        let query = [Point3::new(1e-70, 0.0, 0.0)];
        let data = [5.0, 1.0, 2.0];

        let options = InterpolationOptions::default().with_beta(5.0);
        let values = interpolate_triangles(&query, &mesh, &[[0, 1, 2]], &data, &options).unwrap();
        assert_eq!(values[0], 5.0);
    }

    #[test]
    fn test_missing_data_propagates() {
        let mesh = create_equilateral_triangle();
        let data = [1.0, MISSING, 3.0];
        let queries = [centroid(&mesh), mesh[0]];

        let values = interpolate_triangles(
            &queries,
            &mesh,
            &[[0, 1, 2]; 2],
            &data,
            &InterpolationOptions::default(),
        )
        .unwrap();
        assert!(is_missing(values[0]));
        assert_eq!(values[1], 1.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mesh = create_equilateral_triangle();
        let queries: Vec<Point3<f64>> = (0..20)
            .map(|i| Point3::new(0.05 * i as f64, 0.01 * i as f64, 0.0))
            .collect();
        let triangles = vec![[0, 1, 2]; queries.len()];
        let data = [1.0, -1.0, 0.5];
        let options = InterpolationOptions::default().with_beta(1.5);

        let par = interpolate_triangles(&queries, &mesh, &triangles, &data, &options).unwrap();
        let seq =
            interpolate_triangles(&queries, &mesh, &triangles, &data, &options.clone().sequential())
                .unwrap();
        assert_eq!(par, seq);
    }

    #[test]
    fn test_invalid_triangle_index_rejected() {
        let mesh = create_equilateral_triangle();
        let queries = [mesh[0], mesh[1]];
        let err = interpolate_triangles(
            &queries,
            &mesh,
            &[[0, 1, 2], [0, 3, 1]],
            &[0.0; 3],
            &InterpolationOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::InvalidVertexIndex {
                element: 1,
                index: 3,
                bound: 3
            }
        );
    }

    #[test]
    fn test_length_mismatches_rejected() {
        let mesh = create_equilateral_triangle();
        let options = InterpolationOptions::default();

        let err = interpolate_triangles(&[mesh[0]], &mesh, &[], &[0.0; 3], &options).unwrap_err();
        assert!(matches!(err, MeshError::LengthMismatch { expected: 1, actual: 0, .. }));

        let err =
            interpolate_triangles(&[mesh[0]], &mesh, &[[0, 1, 2]], &[0.0; 2], &options).unwrap_err();
        assert!(matches!(err, MeshError::LengthMismatch { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let mesh = create_equilateral_triangle();
        let options = InterpolationOptions::default();

        let queries = [mesh[0], Point3::new(f64::NAN, 0.0, 0.0)];
        let err = interpolate_triangles(&queries, &mesh, &[[0, 1, 2]; 2], &[0.0; 3], &options)
            .unwrap_err();
        assert_eq!(
            err,
            MeshError::NonFiniteCoordinate {
                what: "query",
                index: 1
            }
        );

        let mut bad_mesh = mesh.clone();
        bad_mesh[2].z = f64::INFINITY;
        let err = interpolate_triangles(&[mesh[0]], &bad_mesh, &[[0, 1, 2]], &[0.0; 3], &options)
            .unwrap_err();
        assert_eq!(
            err,
            MeshError::NonFiniteCoordinate {
                what: "mesh vertex",
                index: 2
            }
        );
    }

    #[test]
    fn test_invalid_beta_rejected() {
        let mesh = create_equilateral_triangle();
        for beta in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let options = InterpolationOptions::default().with_beta(beta);
            assert!(matches!(
                interpolate_triangles(&[mesh[0]], &mesh, &[[0, 1, 2]], &[0.0; 3], &options),
                Err(MeshError::InvalidParameter { name: "beta", .. })
            ));
        }
    }
}
