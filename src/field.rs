//! Per-vertex scalar fields and the missing-value sentinel.
//!
//! A scalar field is a plain `[f64]` with one entry per vertex. Absent
//! measurements (e.g. the medial wall of a cortical surface) are marked
//! with [`MISSING`], which is a NaN. Kernels never fold a missing value into
//! an average; they skip it or propagate it.

/// The missing-value sentinel.
pub const MISSING: f64 = f64::NAN;

/// Returns `true` if `value` marks a missing measurement.
///
/// Any NaN counts as missing. Infinities are ordinary values.
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Count the missing entries in a field.
pub fn count_missing(data: &[f64]) -> usize {
    data.iter().filter(|&&v| is_missing(v)).count()
}
