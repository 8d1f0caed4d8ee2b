//! Grid fixtures shared by the integration tests and the benchmarks.

#![allow(dead_code)]

use haze::mesh::GeodesicNeighborhood;
use nalgebra::Point3;

/// Unit-spaced `(n+1) x (n+1)` grid in the z = 0 plane, two triangles per
/// cell. Vertex `(i, j)` has index `j * (n + 1) + i`.
pub fn create_grid(n: usize) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let side = n + 1;
    let vertices = (0..side)
        .flat_map(|j| (0..side).map(move |i| Point3::new(i as f64, j as f64, 0.0)))
        .collect();

    let faces = (0..n)
        .flat_map(|j| (0..n).map(move |i| j * side + i))
        .flat_map(|corner| {
            let (right, up) = (corner + 1, corner + side);
            [[corner, right, up + 1], [corner, up + 1, up]]
        })
        .collect();

    (vertices, faces)
}

/// Neighborhoods within `radius` on the grid from [`create_grid`].
///
/// Geodesic and Euclidean distance coincide on a flat grid, so these are
/// exact. Only the `radius`-sized window around each vertex is scanned.
pub fn grid_neighborhood(n: usize, radius: f64) -> GeodesicNeighborhood {
    let side = (n + 1) as isize;
    let reach = radius.floor() as isize;
    let mut indices = Vec::with_capacity((side * side) as usize);
    let mut distances = Vec::with_capacity((side * side) as usize);

    for j in 0..side {
        for i in 0..side {
            let mut idx = Vec::new();
            let mut dist = Vec::new();
            for nj in (j - reach).max(0)..=(j + reach).min(side - 1) {
                for ni in (i - reach).max(0)..=(i + reach).min(side - 1) {
                    let (di, dj) = ((ni - i) as f64, (nj - j) as f64);
                    let d = (di * di + dj * dj).sqrt();
                    if d <= radius {
                        idx.push((nj * side + ni) as usize);
                        dist.push(d);
                    }
                }
            }
            indices.push(idx);
            distances.push(dist);
        }
    }

    GeodesicNeighborhood::new(indices, distances).unwrap()
}
