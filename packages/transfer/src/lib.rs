//! Resumable pooled file transfer with progress tracking.
//!
//! This crate copies a fixed batch of files into one destination directory:
//!
//! * A bounded pool of worker threads fed through a rendezvous channel
//! * Resume policy: leftover `.dld` files are dropped, complete copies skipped
//! * Temp file + sync + rename so only finished copies carry the final name
//! * Per-worker byte progress and aggregate file progress callbacks
//! * Fail-fast or collect-all failure handling with cooperative cancellation
//!
//! # Example
//!
//! ```rust,ignore
//! use batch_fetch_transfer::{NoProgress, TransferOptions, run_transfer};
//!
//! let report = run_transfer(&files, dest, &TransferOptions::default(), |_| NoProgress, |p| {
//!     println!("{}/{} files", p.files_completed, p.files_total);
//! })?;
//! println!("{} copied, {} already present", report.copied(), report.already_present());
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod copy;
mod error;
mod pool;
mod progress;
mod resume;

pub use copy::{CancelToken, FileOutcome, transfer_file};
pub use error::TransferError;
pub use pool::{
    DEFAULT_WORKERS, FailurePolicy, JobOutcome, JobStatus, TransferOptions, TransferReport,
    run_transfer,
};
pub use progress::{FileProgress, NoProgress, ProgressTracker, TransferProgress};
pub use resume::{ResumeDecision, TEMP_SUFFIX, decide, destination_path, temp_path};
