//! Resume decisions for previously interrupted runs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use batch_fetch_config::FileDescriptor;
pub use batch_fetch_config::TEMP_SUFFIX;

use crate::error::TransferError;

/// What to do with a file before transferring it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeDecision {
    /// The destination already holds a complete copy.
    Skip,
    /// Copy from scratch.
    Fresh,
}

/// Final destination path of a file.
#[must_use]
pub fn destination_path(file: &FileDescriptor, destination: &Path) -> PathBuf {
    destination.join(&file.display_name)
}

/// Temporary path a file is copied to before the final rename.
#[must_use]
pub fn temp_path(file: &FileDescriptor, destination: &Path) -> PathBuf {
    destination.join(file.temp_name())
}

/// Decide whether a file needs copying, cleaning up stale state on the way.
///
/// 1. A leftover temporary file is always deleted.
/// 2. No destination file: [`ResumeDecision::Fresh`].
/// 3. Destination size equals `size_bytes`: [`ResumeDecision::Skip`].
/// 4. Destination size differs: the destination is deleted, [`ResumeDecision::Fresh`].
///
/// Completeness is judged by size only.
///
/// # Errors
///
/// * If a stale file cannot be deleted
/// * If the destination exists but cannot be stat'ed
pub fn decide(file: &FileDescriptor, destination: &Path) -> Result<ResumeDecision, TransferError> {
    let temp = temp_path(file, destination);
    if remove_if_exists(&temp)? {
        log::debug!("Removed leftover {}", temp.display());
    }

    let target = destination_path(file, destination);
    let metadata = match fs::metadata(&target) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ResumeDecision::Fresh),
        Err(e) => {
            return Err(TransferError::MetadataError {
                path: target,
                io_error: e,
            });
        }
    };

    if metadata.len() == file.size_bytes {
        log::debug!("{} is already complete", target.display());
        return Ok(ResumeDecision::Skip);
    }

    log::debug!(
        "{} has {} of {} byte(s), starting over",
        target.display(),
        metadata.len(),
        file.size_bytes
    );
    remove_if_exists(&target)?;

    Ok(ResumeDecision::Fresh)
}

/// Delete a file, returning whether it existed.
pub(crate) fn remove_if_exists(path: &Path) -> Result<bool, TransferError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(TransferError::RemoveError {
            path: path.to_path_buf(),
            io_error: e,
        }),
    }
}
