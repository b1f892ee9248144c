//! Progress tracking for transfer operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use batch_fetch_config::FileDescriptor;

/// Aggregate progress of a transfer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    /// Total number of files in the batch.
    pub files_total: u64,
    /// Number of files processed so far.
    pub files_completed: u64,
}

impl TransferProgress {
    /// Create a new progress report.
    #[must_use]
    pub const fn new(files_total: u64, files_completed: u64) -> Self {
        Self {
            files_total,
            files_completed,
        }
    }

    /// Calculate progress as a percentage (0.0 to 100.0).
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.files_total == 0 {
            100.0
        } else {
            (self.files_completed as f64 / self.files_total as f64) * 100.0
        }
    }
}

/// Per-worker progress display for the file currently being transferred.
///
/// Each worker owns its handle; only that worker updates it.
pub trait FileProgress {
    /// A new file was picked up.
    fn begin(&mut self, file: &FileDescriptor);

    /// Bytes of the current file transferred so far.
    fn update(&mut self, bytes: u64);

    /// The worker has no more files.
    fn done(&mut self);
}

/// A [`FileProgress`] that displays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl FileProgress for NoProgress {
    fn begin(&mut self, _file: &FileDescriptor) {}

    fn update(&mut self, _bytes: u64) {}

    fn done(&mut self) {}
}

/// Thread-safe progress tracker using atomics.
#[derive(Debug)]
pub struct ProgressTracker {
    files_total: AtomicU64,
    files_completed: AtomicU64,
    in_flight: AtomicU64,
    peak_in_flight: AtomicU64,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Set the total number of files.
    pub fn set_total(&self, total: u64) {
        self.files_total.store(total, Ordering::SeqCst);
    }

    /// Increment the completed count by 1.
    pub fn increment_completed(&self) {
        self.files_completed.fetch_add(1, Ordering::SeqCst);
    }

    /// A worker started a job.
    pub fn job_started(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    /// A worker finished a job.
    pub fn job_finished(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    /// Get the current total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.files_total.load(Ordering::SeqCst)
    }

    /// Get the current completed count.
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.files_completed.load(Ordering::SeqCst)
    }

    /// Jobs currently being processed.
    #[must_use]
    pub fn in_flight(&self) -> u64 {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of jobs processed at the same time.
    #[must_use]
    pub fn peak_in_flight(&self) -> u64 {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Get a progress snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TransferProgress {
        TransferProgress::new(self.total(), self.completed())
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self {
            files_total: AtomicU64::new(0),
            files_completed: AtomicU64::new(0),
            in_flight: AtomicU64::new(0),
            peak_in_flight: AtomicU64::new(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert!((TransferProgress::new(4, 1).percentage() - 25.0).abs() < f64::EPSILON);
        assert!((TransferProgress::new(0, 0).percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tracker_peak_in_flight() {
        let tracker = ProgressTracker::new();
        tracker.job_started();
        tracker.job_started();
        tracker.job_finished();
        tracker.job_started();
        tracker.job_finished();
        tracker.job_finished();

        assert_eq!(tracker.in_flight(), 0);
        assert_eq!(tracker.peak_in_flight(), 2);
    }
}
