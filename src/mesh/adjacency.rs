//! Vertex adjacency lists.

use crate::error::{MeshError, Result};

/// Per-vertex neighbor lists over `N` vertices.
///
/// The neighborhood definition is up to the caller: the 1-ring built by
/// [`Adjacency::from_triangles`] is the common choice, but any relation works
/// (k-ring, a radius query, a vertex listing only itself).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Wrap caller-supplied neighbor lists.
    ///
    /// Indices are checked by [`Adjacency::validate`] when a kernel runs.
    pub fn new(neighbors: Vec<Vec<usize>>) -> Self {
        Self { neighbors }
    }

    /// Build the 1-ring adjacency of a triangle soup.
    ///
    /// Each vertex lists the other vertices it shares a face with, sorted
    /// and without duplicates. Vertices not referenced by any face get an
    /// empty list.
    ///
    /// # Example
    /// ```
    /// use haze::mesh::Adjacency;
    ///
    /// let adj = Adjacency::from_triangles(4, &[[0, 1, 2], [0, 2, 3]]).unwrap();
    /// assert_eq!(adj.neighbors(0), &[1, 2, 3]);
    /// assert_eq!(adj.neighbors(1), &[0, 2]);
    /// ```
    pub fn from_triangles(num_vertices: usize, faces: &[[usize; 3]]) -> Result<Self> {
        let mut neighbors = vec![Vec::new(); num_vertices];

        for (fi, face) in faces.iter().enumerate() {
            for &vi in face {
                if vi >= num_vertices {
                    return Err(MeshError::InvalidVertexIndex {
                        element: fi,
                        index: vi,
                        bound: num_vertices,
                    });
                }
            }
            for &v in face {
                for &other in face {
                    if other != v {
                        neighbors[v].push(other);
                    }
                }
            }
        }

        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Ok(Self { neighbors })
    }

    /// Add every vertex to its own neighbor list (if not already present).
    ///
    /// With self-loops, neighbor averaging blends a vertex with its
    /// surroundings instead of replacing it.
    pub fn with_self(mut self) -> Self {
        for (v, list) in self.neighbors.iter_mut().enumerate() {
            if !list.contains(&v) {
                list.push(v);
            }
        }
        self
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Neighbors of vertex `v`.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[v]
    }

    /// Iterate over all neighbor lists in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.neighbors.iter().map(Vec::as_slice)
    }

    /// Check that there is one list per vertex and every index is below `num_vertices`.
    pub fn validate(&self, num_vertices: usize) -> Result<()> {
        MeshError::check_len("adjacency vs data", num_vertices, self.len())?;
        for (v, list) in self.iter().enumerate() {
            if let Some(&bad) = list.iter().find(|&&n| n >= num_vertices) {
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

impl From<Vec<Vec<usize>>> for Adjacency {
    fn from(neighbors: Vec<Vec<usize>>) -> Self {
        Self::new(neighbors)
    }
}
