//! Bounded worker pool driving the transfer of a batch of files.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::thread;

use batch_fetch_config::FileDescriptor;
use crossbeam_channel::{Receiver, Sender};

use crate::copy::{CancelToken, FileOutcome, transfer_file};
use crate::error::TransferError;
use crate::progress::{FileProgress, ProgressTracker, TransferProgress};

/// Number of workers used when none is configured.
pub const DEFAULT_WORKERS: usize = 3;

/// How the pool reacts to a failed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop dispatching, interrupt in-flight copies and fail the run.
    #[default]
    FailFast,
    /// Record the failure and carry on with the remaining files.
    Continue,
}

/// Options for a transfer run.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Number of concurrent workers.
    pub workers: usize,
    /// Reaction to failed files.
    pub failure_policy: FailurePolicy,
    /// Token that stops the run when cancelled, from inside or outside.
    pub cancel: CancelToken,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            failure_policy: FailurePolicy::default(),
            cancel: CancelToken::new(),
        }
    }
}

/// What happened to one file.
#[derive(Debug)]
pub enum JobStatus {
    /// Copied to the destination.
    Copied {
        /// Bytes written.
        bytes: u64,
    },
    /// A complete copy was already present.
    AlreadyPresent,
    /// The run was cancelled before or while this file was processed.
    Cancelled,
    /// The transfer failed.
    Failed(TransferError),
}

/// Outcome of one job.
#[derive(Debug)]
pub struct JobOutcome {
    /// The file.
    pub file: FileDescriptor,
    /// What happened to it.
    pub status: JobStatus,
    /// Index of the worker that processed it.
    pub worker: usize,
}

impl JobOutcome {
    /// Whether the destination now holds a complete copy.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(
            self.status,
            JobStatus::Copied { .. } | JobStatus::AlreadyPresent
        )
    }
}

/// Outcomes of a transfer run, in completion order.
#[derive(Debug, Default)]
pub struct TransferReport {
    /// Files in the batch.
    pub total: usize,
    /// One entry per dispatched file.
    pub outcomes: Vec<JobOutcome>,
    /// Highest number of files processed at the same time.
    pub peak_in_flight: u64,
}

impl TransferReport {
    /// Files now complete at the destination.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_complete()).count()
    }

    /// Files copied during this run.
    #[must_use]
    pub fn copied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, JobStatus::Copied { .. }))
            .count()
    }

    /// Files skipped because a complete copy was already present.
    #[must_use]
    pub fn already_present(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, JobStatus::AlreadyPresent))
            .count()
    }

    /// Bytes written during this run.
    #[must_use]
    pub fn bytes_copied(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                JobStatus::Copied { bytes } => bytes,
                _ => 0,
            })
            .sum()
    }

    /// Failed files with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&FileDescriptor, &TransferError)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            JobStatus::Failed(e) => Some((&o.file, e)),
            _ => None,
        })
    }

    /// Whether every file in the batch is complete.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.completed() == self.total
    }
}

/// Transfer a batch of files with a fixed pool of workers.
///
/// `options.workers` workers are started before anything is dispatched, each
/// with its own [`FileProgress`] from `make_progress(worker_index)`. Files are
/// handed over one at a time through a rendezvous channel in input order, so
/// an idle worker always takes the next file. Every finished job is counted by
/// a single completion drainer which calls `on_total` after each one. The
/// function returns once the queue is closed, every worker has exited and the
/// drainer has counted every dispatched job.
///
/// # Arguments
///
/// * `files` - The batch; each file is dispatched at most once
/// * `destination` - Directory receiving the copies
/// * `options` - Pool size, failure policy and cancellation token
/// * `make_progress` - Creates the per-worker progress handle
/// * `on_total` - Aggregate progress callback
///
/// # Errors
///
/// * [`TransferError::InvalidPoolSize`] if `options.workers` is zero
/// * [`TransferError::Aborted`] under [`FailurePolicy::FailFast`] when a file failed
/// * [`TransferError::Cancelled`] if the token was cancelled from outside
pub fn run_transfer<W, M, T>(
    files: &[FileDescriptor],
    destination: &Path,
    options: &TransferOptions,
    mut make_progress: M,
    on_total: T,
) -> Result<TransferReport, TransferError>
where
    W: FileProgress + Send,
    M: FnMut(usize) -> W,
    T: Fn(&TransferProgress) + Send,
{
    if options.workers == 0 {
        return Err(TransferError::InvalidPoolSize(options.workers));
    }

    log::debug!(
        "Transferring {} file(s) to {} with {} worker(s)",
        files.len(),
        destination.display(),
        options.workers
    );

    let tracker = ProgressTracker::new();
    tracker.set_total(files.len() as u64);
    on_total(&tracker.snapshot());

    let cancel = &options.cancel;
    let policy = options.failure_policy;
    let tracker_ref = tracker.as_ref();

    let outcomes = thread::scope(|scope| {
        let (job_tx, job_rx) = crossbeam_channel::bounded::<&FileDescriptor>(0);
        let (done_tx, done_rx) = crossbeam_channel::unbounded::<JobOutcome>();

        for index in 0..options.workers {
            let worker = Worker {
                index,
                jobs: job_rx.clone(),
                done: done_tx.clone(),
                progress: make_progress(index),
                destination,
                cancel,
                policy,
                tracker: tracker_ref,
            };
            scope.spawn(move || worker.run());
        }
        drop(job_rx);
        drop(done_tx);

        let drainer = scope.spawn(move || {
            let mut outcomes = Vec::new();
            for outcome in done_rx {
                tracker_ref.increment_completed();
                on_total(&tracker_ref.snapshot());
                outcomes.push(outcome);
            }
            outcomes
        });

        for file in files {
            if cancel.is_cancelled() {
                log::debug!("Run cancelled, no longer dispatching");
                break;
            }
            if job_tx.send(file).is_err() {
                break;
            }
        }
        drop(job_tx);

        drainer
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    });

    let report = TransferReport {
        total: files.len(),
        outcomes,
        peak_in_flight: tracker.peak_in_flight(),
    };

    log::debug!(
        "Transfer finished: {} copied, {} already present, {} of {} complete",
        report.copied(),
        report.already_present(),
        report.completed(),
        report.total
    );

    finish(report, policy, cancel)
}

/// Turn a finished run into the caller-facing result.
fn finish(
    mut report: TransferReport,
    policy: FailurePolicy,
    cancel: &CancelToken,
) -> Result<TransferReport, TransferError> {
    if policy == FailurePolicy::FailFast {
        let failed = report
            .outcomes
            .iter()
            .position(|o| matches!(o.status, JobStatus::Failed(_)));

        if let Some(pos) = failed {
            let completed = report.completed();
            let outcome = report.outcomes.swap_remove(pos);
            for (file, e) in report.failures() {
                log::error!("{}: {e}", file.display_name);
            }
            if let JobStatus::Failed(cause) = outcome.status {
                return Err(TransferError::Aborted {
                    cause: Box::new(cause),
                    completed,
                    total: report.total,
                });
            }
        }
    }

    if cancel.is_cancelled() && !report.is_success() {
        return Err(TransferError::Cancelled {
            completed: report.completed(),
            total: report.total,
        });
    }

    Ok(report)
}

/// One long-lived pool worker.
struct Worker<'a, W> {
    index: usize,
    jobs: Receiver<&'a FileDescriptor>,
    done: Sender<JobOutcome>,
    progress: W,
    destination: &'a Path,
    cancel: &'a CancelToken,
    policy: FailurePolicy,
    tracker: &'a ProgressTracker,
}

impl<W: FileProgress> Worker<'_, W> {
    fn run(mut self) {
        let jobs = self.jobs.clone();
        for file in &jobs {
            self.tracker.job_started();
            self.progress.begin(file);
            self.progress.update(0);

            let status = self.process(file);

            self.tracker.job_finished();

            let outcome = JobOutcome {
                file: file.clone(),
                status,
                worker: self.index,
            };
            if self.done.send(outcome).is_err() {
                break;
            }
        }

        log::trace!("Worker {} exiting", self.index);
        self.progress.done();
    }

    fn process(&mut self, file: &FileDescriptor) -> JobStatus {
        if self.cancel.is_cancelled() {
            return JobStatus::Cancelled;
        }

        let progress = &mut self.progress;
        match transfer_file(file, self.destination, self.cancel, |bytes| {
            progress.update(bytes);
        }) {
            Ok(FileOutcome::Copied { bytes }) => JobStatus::Copied { bytes },
            Ok(FileOutcome::AlreadyPresent) => JobStatus::AlreadyPresent,
            Err(TransferError::Interrupted { .. }) => JobStatus::Cancelled,
            Err(e) => {
                log::debug!("Worker {} failed on {}: {e}", self.index, file.display_name);
                if self.policy == FailurePolicy::FailFast {
                    self.cancel.cancel();
                }
                JobStatus::Failed(e)
            }
        }
    }
}
