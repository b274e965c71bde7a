//! Progress reporting for subdivision passes.
//!
//! A [`Progress`] wraps a callback that receives `(current, total, message)`
//! updates. [`catmull_clark_with_progress`] reports one step per pipeline
//! stage; callers running several passes can nest those reports inside their
//! own step count with [`Progress::within`].
//!
//! ```
//! use std::sync::Arc;
//! use quadsub::algo::Progress;
//! use quadsub::algo::subdivide::{catmull_clark_with_progress, SubdivideOptions};
//! use quadsub::mesh::QuadMesh;
//!
//! let overall = Arc::new(Progress::new(|current, total, message| {
//!     println!("[{}/{}] {}", current, total, message);
//! }));
//!
//! let mut mesh = QuadMesh::cube(1.0);
//! for pass in 0..2 {
//!     let progress = Progress::within(&overall, pass, 2);
//!     mesh = catmull_clark_with_progress(&mesh, &SubdivideOptions::new(), &progress).unwrap();
//! }
//! ```
//!
//! [`catmull_clark_with_progress`]: crate::algo::subdivide::catmull_clark_with_progress

use std::sync::Arc;

type Callback = Box<dyn Fn(usize, usize, &str) + Send + Sync>;

/// A progress callback that receives updates during long-running operations.
///
/// The callback receives:
/// - `current`: Current step (0-based, equal to `total` when done)
/// - `total`: Total number of steps
/// - `message`: Description of the current step
pub struct Progress {
    callback: Callback,
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

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Report progress within a sub-range.
    ///
    /// Maps `[0, sub_total]` onto `[range_current, range_current + 1]` out of
    /// `range_total` steps, in thousandths of a step.
    #[inline]
    pub fn report_sub(
        &self,
        sub_current: usize,
        sub_total: usize,
        range_current: usize,
        range_total: usize,
        message: &str,
    ) {
        if sub_total == 0 || range_total == 0 {
            return;
        }
        let sub_fraction = (sub_current * 1000) / sub_total;
        let effective = range_current * 1000 + sub_fraction;
        (self.callback)(effective, range_total * 1000, message);
    }

    /// A reporter whose updates land inside step `step` of `steps` of `parent`.
    pub fn within(parent: &Arc<Progress>, step: usize, steps: usize) -> Self {
        let parent = Arc::clone(parent);
        Self::new(move |current, total, message| {
            parent.report_sub(current, total, step, steps, message);
        })
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<(usize, usize)>>>, Progress) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let progress = Progress::new(move |current, total, _| {
            sink.lock().unwrap().push((current, total));
        });
        (log, progress)
    }

    #[test]
    fn test_report_sub_scales() {
        let (log, progress) = recorder();
        progress.report_sub(1, 2, 3, 4, "half of step 3");
        assert_eq!(*log.lock().unwrap(), vec![(3500, 4000)]);
    }

    #[test]
    fn test_report_sub_ignores_empty_ranges() {
        let (log, progress) = recorder();
        progress.report_sub(1, 0, 0, 4, "");
        progress.report_sub(1, 2, 0, 0, "");
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_within_nests_into_parent_step() {
        let (log, progress) = recorder();
        let parent = Arc::new(progress);
        let child = Progress::within(&parent, 1, 2);
        child.report(0, 5, "start");
        child.report(5, 5, "done");
        assert_eq!(*log.lock().unwrap(), vec![(1000, 2000), (2000, 2000)]);
    }
}
