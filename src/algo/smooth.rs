//! Iterative neighbor-average smoothing of per-vertex data.
//!
//! Each iteration replaces every vertex value with the mean of its
//! neighbors' values from the previous iteration. The neighborhood is
//! whatever [`Adjacency`] the caller supplies, so a k-ring or a
//! self-inclusive 1-ring give progressively wider or gentler filters.
//!
//! # Missing values
//!
//! - A vertex whose value is [`MISSING`] stays missing for every later
//!   iteration and never contributes to a neighbor's mean.
//! - The mean is taken over the non-missing neighbors only.
//! - A non-missing vertex without any non-missing neighbor becomes missing.
//!
//! # Example
//!
//! ```
//! use haze::algo::smooth::{smooth_neighbors, NeighborSmoothOptions};
//! use haze::mesh::Adjacency;
//!
//! let adj = Adjacency::new(vec![vec![1], vec![0]]);
//! let smoothed = smooth_neighbors(&adj, &[2.0, 4.0], &NeighborSmoothOptions::default()).unwrap();
//! assert_eq!(smoothed, vec![4.0, 2.0]);
//! ```

use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::field::{count_missing, is_missing, MISSING};
use crate::mesh::Adjacency;

use super::Progress;

/// Options for neighbor-average smoothing.
#[derive(Debug, Clone)]
pub struct NeighborSmoothOptions {
    /// Number of smoothing iterations (must be at least 1).
    pub iterations: usize,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for NeighborSmoothOptions {
    fn default() -> Self {
        Self {
            iterations: 1,
            parallel: true,
        }
    }
}

impl NeighborSmoothOptions {
    /// Create options with the specified number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
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
        if self.iterations == 0 {
            return Err(MeshError::invalid_param(
                "iterations",
                self.iterations,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Smooth per-vertex data by repeated neighbor averaging.
///
/// # Arguments
///
/// * `adjacency` - Neighbor lists, one per vertex
/// * `data` - One value per vertex, may contain [`MISSING`]
/// * `options` - Iteration count and execution mode
///
/// # Errors
///
/// Returns an error if `options.iterations` is zero, if the adjacency does
/// not have one list per data value, or if a neighbor index is out of range.
pub fn smooth_neighbors(
    adjacency: &Adjacency,
    data: &[f64],
    options: &NeighborSmoothOptions,
) -> Result<Vec<f64>> {
    smooth_neighbors_with_progress(adjacency, data, options, &Progress::none())
}

/// Neighbor-average smoothing with progress reporting.
///
/// Progress is reported before each iteration and once on completion.
pub fn smooth_neighbors_with_progress(
    adjacency: &Adjacency,
    data: &[f64],
    options: &NeighborSmoothOptions,
    progress: &Progress,
) -> Result<Vec<f64>> {
    options.validate()?;
    adjacency.validate(data.len())?;

    let num_values = data.len();
    let missing_in = count_missing(data);
    log::debug!(
        "neighbor smoothing: {} iterations over {} values ({} missing)",
        options.iterations,
        num_values,
        missing_in
    );

    // Ping-pong buffers: iteration i reads slot i % 2 and writes the other.
    let mut buffers = [data.to_vec(), vec![MISSING; num_values]];

    // A vertex is isolated at most once: it is missing from then on.
    let mut isolated = 0;
    for iter in 0..options.iterations {
        progress.report(iter, options.iterations, "Neighbor smoothing");

        let [front, back] = &mut buffers;
        let (source, target) = if iter % 2 == 0 {
            (&*front, back)
        } else {
            (&*back, front)
        };
        isolated += apply_neighbor_mean(adjacency, source, target, options.parallel);
    }
    progress.report(options.iterations, options.iterations, "Neighbor smoothing");

    let smoothed = std::mem::take(&mut buffers[options.iterations % 2]);

    if isolated > 0 {
        log::debug!(
            "neighbor smoothing: {} vertices had no non-missing neighbors and became missing",
            isolated
        );
    }

    Ok(smoothed)
}

/// Outcome of averaging one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
enum VertexMean {
    /// Mean over the non-missing neighbors.
    Value(f64),
    /// The vertex itself is missing.
    Missing,
    /// The vertex is valid but none of its neighbors are.
    Isolated,
}

impl VertexMean {
    fn value(self) -> f64 {
        match self {
            VertexMean::Value(v) => v,
            VertexMean::Missing | VertexMean::Isolated => MISSING,
        }
    }
}

/// Write one smoothing step into `target`, returning the number of
/// vertices that became missing for lack of valid neighbors.
fn apply_neighbor_mean(
    adjacency: &Adjacency,
    source: &[f64],
    target: &mut [f64],
    parallel: bool,
) -> usize {
    let compute_vertex = |(v, out): (usize, &mut f64)| -> usize {
        let mean = neighbor_mean(source, v, adjacency.neighbors(v));
        *out = mean.value();
        usize::from(mean == VertexMean::Isolated)
    };

    if parallel {
        target.par_iter_mut().enumerate().map(compute_vertex).sum()
    } else {
        target.iter_mut().enumerate().map(compute_vertex).sum()
    }
}

fn neighbor_mean(source: &[f64], v: usize, neighbors: &[usize]) -> VertexMean {
    if is_missing(source[v]) {
        return VertexMean::Missing;
    }

    let mut neighbor_sum = 0.0;
    let mut neighbor_count = 0usize;
    for &n in neighbors {
        let val = source[n];
        if !is_missing(val) {
            neighbor_sum += val;
            neighbor_count += 1;
        }
    }

    if neighbor_count == 0 {
        VertexMean::Isolated
    } else {
        VertexMean::Value(neighbor_sum / neighbor_count as f64)
    }
}
