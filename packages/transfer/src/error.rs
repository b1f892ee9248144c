//! Error types for transfer operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

/// Errors that can occur during transfer operations.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Failed to open a source file.
    #[error("Failed to open file {}: {io_error}", path.display())]
    OpenError {
        /// The source path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to create the temporary destination file.
    #[error("Failed to create file {}: {io_error}", path.display())]
    CreateError {
        /// The temporary file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed while copying bytes.
    #[error("Failed to copy {} to {}: {io_error}", source_path.display(), target_path.display())]
    FileCopyError {
        /// Source file path.
        source_path: PathBuf,
        /// Target file path.
        target_path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to flush the temporary file to disk.
    #[error("Failed to flush file {}: {io_error}", path.display())]
    SyncError {
        /// The temporary file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to move the finished copy into place.
    #[error("Failed to rename file {} to {}: {io_error}", from.display(), to.display())]
    RenameError {
        /// The temporary file path.
        from: PathBuf,
        /// The final destination path.
        to: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to delete a partially transferred file.
    #[error("Failed to delete partially downloaded file {}: {io_error}", path.display())]
    RemoveError {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to get file metadata.
    #[error("Failed to get metadata for {}: {io_error}", path.display())]
    MetadataError {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// A copy stopped because the run was cancelled.
    #[error("Copy of {} was interrupted", path.display())]
    Interrupted {
        /// The source path.
        path: PathBuf,
    },

    /// The pool needs at least one worker.
    #[error("Invalid worker count {0}: at least one worker is required")]
    InvalidPoolSize(usize),

    /// The run was cancelled from outside before every file was processed.
    #[error("Transfer cancelled after {completed} of {total} file(s)")]
    Cancelled {
        /// Files transferred or already present.
        completed: usize,
        /// Files in the batch.
        total: usize,
    },

    /// A file failed and the run stopped early.
    #[error("Transfer aborted after {completed} of {total} file(s): {cause}")]
    Aborted {
        /// The first failure.
        #[source]
        cause: Box<TransferError>,
        /// Files transferred or already present.
        completed: usize,
        /// Files in the batch.
        total: usize,
    },
}
