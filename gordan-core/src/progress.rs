//! Progress reporting and cooperative cancellation for long enumerations.
//!
//! A [`ProgressTracker`] is shared between the thread performing an
//! enumeration (which writes progress and polls for cancellation) and any
//! number of observing threads (which read progress and may request
//! cancellation). Cancellation is advisory: the engine stops at its next
//! suspension point and returns normally.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

struct Inner {
    /// Description of the stage currently in progress.
    description: String,
    /// Progress through the current stage, from 0 to 100.
    stage_percent: f64,
    /// Overall progress contributed by fully completed stages.
    prev_percent: f64,
    /// The fraction of the overall computation that the current stage
    /// represents, from 0 to 1.
    stage_weight: f64,
    finished: bool,
}

/// Tracks percentage progress, stage descriptions and cancellation
/// requests for a long enumeration run.
///
/// The overall percentage is assembled from per-stage percentages scaled
/// by the stage weights declared through [`new_stage`](Self::new_stage).
pub struct ProgressTracker {
    inner: Mutex<Inner>,
    cancelled: AtomicBool,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    /// Creates a tracker at zero percent with an empty description.
    pub fn new() -> Self {
        ProgressTracker {
            inner: Mutex::new(Inner {
                description: String::new(),
                stage_percent: 0.0,
                prev_percent: 0.0,
                // No stage is in progress until new_stage() is called.
                stage_weight: 0.0,
                finished: false,
            }),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Begins a new stage of the computation.
    ///
    /// Any stage currently in progress is treated as complete: its full
    /// weight is folded into the overall percentage. The weight is the
    /// fraction of the total computation this stage represents and is
    /// clamped to `0..=1`.
    pub fn new_stage(&self, description: impl Into<String>, weight: f64) {
        let mut inner = self.inner.lock().expect("progress lock poisoned");
        inner.prev_percent += 100.0 * inner.stage_weight;
        if inner.prev_percent > 100.0 {
            inner.prev_percent = 100.0;
        }
        inner.stage_percent = 0.0;
        inner.stage_weight = weight.clamp(0.0, 1.0);
        inner.description = description.into();
    }

    /// Updates progress through the current stage.
    ///
    /// Returns `false` if cancellation has been requested, so callers can
    /// combine the update with a cancellation poll.
    pub fn set_percent(&self, percent: f64) -> bool {
        {
            let mut inner = self.inner.lock().expect("progress lock poisoned");
            inner.stage_percent = percent.clamp(0.0, 100.0);
        }
        !self.is_cancelled()
    }

    /// Returns overall progress, from 0 to 100.
    pub fn percent(&self) -> f64 {
        let inner = self.inner.lock().expect("progress lock poisoned");
        inner.prev_percent + inner.stage_percent * inner.stage_weight
    }

    /// Returns the description of the current stage.
    pub fn description(&self) -> String {
        let inner = self.inner.lock().expect("progress lock poisoned");
        inner.description.clone()
    }

    /// Requests cancellation. The computation will stop at its next
    /// suspension point; this call never blocks on the computation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Determines whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Marks the computation as finished (whether complete or cancelled).
    pub fn set_finished(&self) {
        let mut inner = self.inner.lock().expect("progress lock poisoned");
        inner.prev_percent = 100.0;
        inner.stage_percent = 0.0;
        inner.stage_weight = 0.0;
        inner.finished = true;
    }

    /// Determines whether the computation has finished.
    pub fn is_finished(&self) -> bool {
        self.inner.lock().expect("progress lock poisoned").finished
    }
}

/// Tracks progress for computations whose total amount of work is not
/// known in advance: instead of a percentage, an ever-increasing step
/// count is reported.
pub struct ProgressTrackerOpen {
    inner: Mutex<OpenInner>,
    cancelled: AtomicBool,
}

struct OpenInner {
    description: String,
    steps: u64,
    finished: bool,
}

impl Default for ProgressTrackerOpen {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTrackerOpen {
    /// Creates a tracker at zero steps with an empty description.
    pub fn new() -> Self {
        ProgressTrackerOpen {
            inner: Mutex::new(OpenInner {
                description: String::new(),
                steps: 0,
                finished: false,
            }),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Begins a new stage of the computation. The step count carries on
    /// rising across stages.
    pub fn new_stage(&self, description: impl Into<String>) {
        let mut inner = self.inner.lock().expect("progress lock poisoned");
        inner.description = description.into();
    }

    /// Adds to the step count. Returns `false` if cancellation has been
    /// requested.
    pub fn inc_steps(&self, add: u64) -> bool {
        {
            let mut inner = self.inner.lock().expect("progress lock poisoned");
            inner.steps += add;
        }
        !self.is_cancelled()
    }

    /// Returns the total number of steps performed so far.
    pub fn steps(&self) -> u64 {
        self.inner.lock().expect("progress lock poisoned").steps
    }

    /// Returns the description of the current stage.
    pub fn description(&self) -> String {
        let inner = self.inner.lock().expect("progress lock poisoned");
        inner.description.clone()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Determines whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Marks the computation as finished.
    pub fn set_finished(&self) {
        self.inner.lock().expect("progress lock poisoned").finished = true;
    }

    /// Determines whether the computation has finished.
    pub fn is_finished(&self) -> bool {
        self.inner.lock().expect("progress lock poisoned").finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_stage_percent() {
        let tracker = ProgressTracker::new();
        tracker.new_stage("enumerating", 1.0);
        assert!(tracker.set_percent(40.0));
        assert!((tracker.percent() - 40.0).abs() < 1e-9);
        tracker.set_finished();
        assert!(tracker.is_finished());
    }

    #[test]
    fn test_weighted_stages() {
        let tracker = ProgressTracker::new();
        tracker.new_stage("first half", 0.5);
        assert!(tracker.set_percent(50.0));
        assert!((tracker.percent() - 25.0).abs() < 1e-9);

        tracker.new_stage("second half", 0.5);
        assert!((tracker.percent() - 50.0).abs() < 1e-9);
        tracker.set_percent(100.0);
        assert!((tracker.percent() - 100.0).abs() < 1e-9);

        tracker.set_finished();
        assert!((tracker.percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancellation() {
        let tracker = ProgressTracker::new();
        assert!(!tracker.is_cancelled());
        assert!(tracker.set_percent(10.0));
        tracker.cancel();
        assert!(tracker.is_cancelled());
        assert!(!tracker.set_percent(20.0));
    }

    #[test]
    fn test_description() {
        let tracker = ProgressTracker::new();
        tracker.new_stage("counting faces", 1.0);
        assert_eq!(tracker.description(), "counting faces");
    }

    #[test]
    fn test_open_tracker_counts_steps() {
        let tracker = ProgressTrackerOpen::new();
        tracker.new_stage("searching");
        assert!(tracker.inc_steps(3));
        assert!(tracker.inc_steps(2));
        assert_eq!(tracker.steps(), 5);
        assert_eq!(tracker.description(), "searching");

        tracker.cancel();
        assert!(!tracker.inc_steps(1));
        assert_eq!(tracker.steps(), 6);

        tracker.set_finished();
        assert!(tracker.is_finished());
    }
}
