//! Progress reporting for iterative kernels.
//!
//! ```
//! use haze::algo::Progress;
//!
//! let progress = Progress::new(|current, total, stage| {
//!     println!("[{}/{}] {}", current, total, stage);
//! });
//! progress.report(0, 10, "Neighbor smoothing");
//! ```

/// A callback that receives `(current, total, stage)` updates.
///
/// `current` runs from 0 to `total`; a final call with `current == total`
/// marks completion.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, stage: &str) {
        (self.callback)(current, total, stage);
    }

    /// A reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
