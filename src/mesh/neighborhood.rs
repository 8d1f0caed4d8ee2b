//! Truncated geodesic neighborhoods.

use crate::error::{MeshError, Result};

/// For each vertex, the vertices within some geodesic radius together with
/// their geodesic distances.
///
/// Distances are produced upstream (e.g. by a Dijkstra or heat-method pass
/// with a maximum distance); this type only stores and checks them. The
/// `indices` and `distances` lists of a vertex always have equal length and
/// all distances are non-negative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeodesicNeighborhood {
    indices: Vec<Vec<usize>>,
    distances: Vec<Vec<f64>>,
}

impl GeodesicNeighborhood {
    /// Create a neighborhood from parallel index and distance lists.
    ///
    /// # Errors
    ///
    /// Fails if the outer lengths differ, if any vertex's two lists differ
    /// in length, or if a distance is negative or NaN.
    pub fn new(indices: Vec<Vec<usize>>, distances: Vec<Vec<f64>>) -> Result<Self> {
        MeshError::check_len("neighbor distances vs indices", indices.len(), distances.len())?;

        for (v, (idx, dist)) in indices.iter().zip(&distances).enumerate() {
            MeshError::check_len("vertex neighbor distances vs indices", idx.len(), dist.len())?;
            if let Some((position, &value)) = dist
                .iter()
                .enumerate()
                .find(|(_, &d)| d.is_nan() || d < 0.0)
            {
                return Err(MeshError::InvalidDistance {
                    vertex: v,
                    position,
                    value,
                });
            }
        }

        Ok(Self { indices, distances })
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Neighbor indices and distances of vertex `v`.
    #[inline]
    pub fn neighbors(&self, v: usize) -> (&[usize], &[f64]) {
        (&self.indices[v], &self.distances[v])
    }

    /// Neighbor indices of all vertices.
    #[inline]
    pub fn indices(&self) -> &[Vec<usize>] {
        &self.indices
    }

    /// Neighbor distances of all vertices.
    #[inline]
    pub fn distances(&self) -> &[Vec<f64>] {
        &self.distances
    }

    /// Total number of (vertex, neighbor) entries.
    pub fn num_entries(&self) -> usize {
        self.indices.iter().map(Vec::len).sum()
    }

    /// Largest distance stored in any neighborhood, or `None` if all are empty.
    pub fn max_distance(&self) -> Option<f64> {
        self.distances
            .iter()
            .flatten()
            .copied()
            .fold(None, |acc, d| Some(acc.map_or(d, |m: f64| m.max(d))))
    }

    /// Keep only the entries with distance `<= radius`.
    ///
    /// Use this to cut a wider neighborhood down to the support of a
    /// Gaussian kernel (see [`GaussianSmoothOptions::support_radius`](crate::algo::gaussian::GaussianSmoothOptions::support_radius)).
    pub fn truncated(&self, radius: f64) -> Self {
        let mut indices = Vec::with_capacity(self.len());
        let mut distances = Vec::with_capacity(self.len());

        for (idx, dist) in self.indices.iter().zip(&self.distances) {
            let (kept_idx, kept_dist): (Vec<usize>, Vec<f64>) = idx
                .iter()
                .zip(dist)
                .filter(|(_, &d)| d <= radius)
                .map(|(&i, &d)| (i, d))
                .unzip();
            indices.push(kept_idx);
            distances.push(kept_dist);
        }

        Self { indices, distances }
    }

    /// Insert every vertex into its own neighborhood at distance 0, unless
    /// it is already listed.
    pub fn with_self(mut self) -> Self {
        for (v, (idx, dist)) in self.indices.iter_mut().zip(&mut self.distances).enumerate() {
            if !idx.contains(&v) {
                idx.insert(0, v);
                dist.insert(0, 0.0);
            }
        }
        self
    }

    /// Check that there is one neighborhood per vertex and every index is
    /// below `num_vertices`.
    pub fn validate(&self, num_vertices: usize) -> Result<()> {
        MeshError::check_len("geodesic neighborhood vs data", num_vertices, self.len())?;
        for (v, idx) in self.indices.iter().enumerate() {
            if let Some(&bad) = idx.iter().find(|&&n| n >= num_vertices) {
                return Err(MeshError::InvalidVertexIndex {
                    element: v,
                    index: bad,
                    bound: num_vertices,
                });
            }
        }
        Ok(())
    }
}
