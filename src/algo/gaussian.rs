//! Gaussian smoothing of per-vertex data over geodesic neighborhoods.
//!
//! The kernel width is given as a full width at half maximum (FWHM), the
//! usual convention in surface-based neuroimaging. For every vertex a
//! normalized Gaussian weight is computed from the geodesic distance of each
//! neighbor, and the smoothed value is the weighted sum of the neighbor
//! values. This is a single pass; there are no iterations.
//!
//! The neighborhood itself comes from a geodesic distance computation
//! truncated at [`GaussianSmoothOptions::support_radius`].
//!
//! # Example
//!
//! ```
//! use haze::algo::gaussian::{smooth_gaussian, GaussianSmoothOptions};
//! use haze::mesh::GeodesicNeighborhood;
//!
//! let neigh = GeodesicNeighborhood::new(
//!     vec![vec![0, 1], vec![1, 0]],
//!     vec![vec![0.0, 1.0], vec![0.0, 1.0]],
//! )
//! .unwrap();
//! let options = GaussianSmoothOptions::default().with_fwhm(2.0);
//! let smoothed = smooth_gaussian(&neigh, &[0.0, 1.0], &options).unwrap();
//! assert!(smoothed[0] > 0.0 && smoothed[1] < 1.0);
//! ```

use std::f64::consts::PI;

use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::field::{count_missing, is_missing, MISSING};
use crate::mesh::GeodesicNeighborhood;

/// Options for Gaussian geodesic smoothing.
#[derive(Debug, Clone)]
pub struct GaussianSmoothOptions {
    /// Full width at half maximum of the Gaussian kernel, in mesh units.
    pub fwhm: f64,

    /// Neighborhood cutoff, in Gaussian standard deviations.
    pub trunc_factor: f64,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for GaussianSmoothOptions {
    fn default() -> Self {
        Self {
            fwhm: 5.0,
            trunc_factor: 3.5,
            parallel: true,
        }
    }
}

impl GaussianSmoothOptions {
    /// Set the kernel FWHM.
    pub fn with_fwhm(mut self, fwhm: f64) -> Self {
        self.fwhm = fwhm;
        self
    }

    /// Set the truncation factor.
    pub fn with_trunc_factor(mut self, trunc_factor: f64) -> Self {
        self.trunc_factor = trunc_factor;
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

    /// Standard deviation of the kernel.
    pub fn gstd(&self) -> f64 {
        fwhm_to_gstd(self.fwhm)
    }

    /// Geodesic radius beyond which neighbors should be dropped upstream:
    /// `trunc_factor * gstd`.
    pub fn support_radius(&self) -> f64 {
        self.trunc_factor * self.gstd()
    }

    fn validate(&self) -> Result<()> {
        if !(self.fwhm.is_finite() && self.fwhm > 0.0) {
            return Err(MeshError::invalid_param(
                "fwhm",
                self.fwhm,
                "must be positive and finite",
            ));
        }
        if check_gstd(self.gstd()).is_err() {
            return Err(MeshError::invalid_param(
                "fwhm",
                self.fwhm,
                "too small to represent the kernel",
            ));
        }
        if !(self.trunc_factor.is_finite() && self.trunc_factor > 0.0) {
            return Err(MeshError::invalid_param(
                "trunc_factor",
                self.trunc_factor,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}

/// Convert a full width at half maximum to a Gaussian standard deviation.
///
/// `gstd = fwhm / sqrt(ln 256)`, i.e. `fwhm / (2 * sqrt(2 ln 2))`.
///
/// ```
/// let gstd = haze::algo::gaussian::fwhm_to_gstd(10.0);
/// assert!((gstd - 4.2466).abs() < 1e-4);
/// ```
#[inline]
pub fn fwhm_to_gstd(fwhm: f64) -> f64 {
    fwhm / 256.0_f64.ln().sqrt()
}

/// Compute normalized Gaussian weights for every neighborhood.
///
/// The result is parallel to `neighborhood`: one weight per neighbor entry,
/// summing to 1 for each non-empty neighborhood. An empty neighborhood gives
/// an empty weight list. If all raw weights of a vertex underflow to zero,
/// its weights stay zero.
///
/// # Errors
///
/// Fails if `gstd` is not a positive normal number, or so small that the
/// kernel peak `1 / (sqrt(2 pi) gstd)` overflows.
pub fn gauss_weights(neighborhood: &GeodesicNeighborhood, gstd: f64) -> Result<Vec<Vec<f64>>> {
    check_gstd(gstd)?;
    Ok(gauss_weights_impl(neighborhood, gstd, true))
}

fn check_gstd(gstd: f64) -> Result<()> {
    if !(gstd.is_normal() && gstd > 0.0) {
        return Err(MeshError::invalid_param(
            "gstd",
            gstd,
            "must be a positive normal number",
        ));
    }
    if !gaussian_peak(gstd).is_finite() {
        return Err(MeshError::invalid_param(
            "gstd",
            gstd,
            "kernel peak overflows",
        ));
    }
    Ok(())
}

#[inline]
fn gaussian_peak(gstd: f64) -> f64 {
    1.0 / ((2.0 * PI).sqrt() * gstd)
}

fn gauss_weights_impl(neighborhood: &GeodesicNeighborhood, gstd: f64, parallel: bool) -> Vec<Vec<f64>> {
    let f = gaussian_peak(gstd);

    let compute_vertex = |distances: &Vec<f64>| -> Vec<f64> {
        // Scaled form keeps the d = 0 exponent at exactly 0 for tiny gstd.
        let mut weights: Vec<f64> = distances
            .iter()
            .map(|&d| {
                let z = d / gstd;
                f * (-0.5 * z * z).exp()
            })
            .collect();
        let gsum: f64 = weights.iter().sum();
        if gsum != 0.0 && gsum.is_finite() {
            for w in &mut weights {
                *w /= gsum;
            }
        }
        weights
    };

    if parallel {
        neighborhood.distances().par_iter().map(compute_vertex).collect()
    } else {
        neighborhood.distances().iter().map(compute_vertex).collect()
    }
}

/// Apply precomputed neighborhood weights to `data`.
///
/// The value at vertex `v` is `sum_j weights[v][j] * data[indices[v][j]]`.
/// Missing values follow the same policy as neighbor-average smoothing:
///
/// - a missing vertex stays missing;
/// - missing neighbors are dropped and the remaining weights renormalized;
/// - a vertex left with zero total weight becomes missing.
///
/// # Errors
///
/// Fails if `neighborhood` or `weights` is not parallel to `data`, or if a
/// neighbor index is out of range.
pub fn spatial_filter(
    data: &[f64],
    neighborhood: &GeodesicNeighborhood,
    weights: &[Vec<f64>],
) -> Result<Vec<f64>> {
    neighborhood.validate(data.len())?;
    check_weights(neighborhood, weights)?;
    Ok(spatial_filter_impl(data, neighborhood, weights, true))
}

fn check_weights(neighborhood: &GeodesicNeighborhood, weights: &[Vec<f64>]) -> Result<()> {
    MeshError::check_len("weights vs neighborhood", neighborhood.len(), weights.len())?;
    for (idx, w) in neighborhood.indices().iter().zip(weights) {
        MeshError::check_len("vertex weights vs neighbors", idx.len(), w.len())?;
    }
    Ok(())
}

fn spatial_filter_impl(
    data: &[f64],
    neighborhood: &GeodesicNeighborhood,
    weights: &[Vec<f64>],
    parallel: bool,
) -> Vec<f64> {
    let compute_vertex = |v: usize| -> f64 {
        if is_missing(data[v]) {
            return MISSING;
        }

        let (indices, _) = neighborhood.neighbors(v);
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut skipped = false;

        for (&n, &w) in indices.iter().zip(&weights[v]) {
            let val = data[n];
            if is_missing(val) {
                skipped = true;
                continue;
            }
            weighted_sum += val * w;
            weight_total += w;
        }

        if weight_total <= 0.0 {
            MISSING
        } else if skipped {
            weighted_sum / weight_total
        } else {
            weighted_sum
        }
    };

    if parallel {
        (0..data.len()).into_par_iter().map(compute_vertex).collect()
    } else {
        (0..data.len()).map(compute_vertex).collect()
    }
}

/// Smooth per-vertex data with a Gaussian kernel over geodesic neighborhoods.
///
/// # Arguments
///
/// * `neighborhood` - Truncated geodesic neighborhood of every vertex. Include
///   the vertex itself at distance 0 (see [`GeodesicNeighborhood::with_self`])
///   unless it should be excluded from its own average.
/// * `data` - One value per vertex, may contain [`MISSING`]
/// * `options` - Kernel width and execution mode
///
/// # Errors
///
/// Fails on a non-positive FWHM or truncation factor, or if the
/// neighborhood does not match `data`.
pub fn smooth_gaussian(
    neighborhood: &GeodesicNeighborhood,
    data: &[f64],
    options: &GaussianSmoothOptions,
) -> Result<Vec<f64>> {
    options.validate()?;
    neighborhood.validate(data.len())?;

    let gstd = options.gstd();
    let radius = options.support_radius();
    log::debug!(
        "gaussian smoothing: fwhm={} gstd={:.4} over {} values ({} neighbor entries, {} missing)",
        options.fwhm,
        gstd,
        data.len(),
        neighborhood.num_entries(),
        count_missing(data)
    );

    let beyond = neighborhood
        .distances()
        .iter()
        .flatten()
        .filter(|&&d| d > radius)
        .count();
    if beyond > 0 {
        log::warn!(
            "gaussian smoothing: {} neighbor entries lie beyond the support radius {:.4}",
            beyond,
            radius
        );
    }

    let weights = gauss_weights_impl(neighborhood, gstd, options.parallel);
    Ok(spatial_filter_impl(data, neighborhood, &weights, options.parallel))
}
