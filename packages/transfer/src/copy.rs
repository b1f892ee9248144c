//! Resumable single-file transfer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use batch_fetch_config::FileDescriptor;

use crate::error::TransferError;
use crate::resume::{ResumeDecision, decide, destination_path, remove_if_exists, temp_path};

/// Size of the buffer used to stream file contents.
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Result of transferring one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was copied.
    Copied {
        /// Bytes written.
        bytes: u64,
    },
    /// A complete copy was already present.
    AlreadyPresent,
}

/// Shared flag telling in-flight transfers to stop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder of this token to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether [`CancelToken::cancel`] was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Transfer one file into `destination`.
///
/// The resume policy runs first. A complete copy is reported as fully
/// transferred in one step. Otherwise the source is streamed into
/// `<name>.dld`, synced, and renamed to `<name>`. `on_bytes` receives the
/// running byte count after every write.
///
/// Both file handles are closed before this returns. On failure the
/// temporary file is removed.
///
/// # Arguments
///
/// * `file` - The file to transfer
/// * `destination` - Directory receiving the copy
/// * `cancel` - Checked between buffer writes
/// * `on_bytes` - Callback for byte progress
///
/// # Errors
///
/// * [`TransferError::Interrupted`] if `cancel` fired mid-copy
/// * Any IO failure while cleaning up, opening, copying, syncing or renaming
pub fn transfer_file<F>(
    file: &FileDescriptor,
    destination: &Path,
    cancel: &CancelToken,
    mut on_bytes: F,
) -> Result<FileOutcome, TransferError>
where
    F: FnMut(u64),
{
    log::debug!(
        "Transferring {} -> {}",
        file.source_path.display(),
        destination.display()
    );

    if decide(file, destination)? == ResumeDecision::Skip {
        on_bytes(file.size_bytes);
        return Ok(FileOutcome::AlreadyPresent);
    }

    let temp = temp_path(file, destination);
    let target = destination_path(file, destination);

    let result = copy_to_temp(&file.source_path, &temp, cancel, &mut on_bytes).and_then(|bytes| {
        fs::rename(&temp, &target).map_err(|e| TransferError::RenameError {
            from: temp.clone(),
            to: target.clone(),
            io_error: e,
        })?;
        Ok(bytes)
    });

    match result {
        Ok(bytes) => {
            if bytes != file.size_bytes {
                log::warn!(
                    "{} changed size during copy ({} byte(s) expected, {} copied)",
                    file.source_path.display(),
                    file.size_bytes,
                    bytes
                );
            }
            log::trace!("Copied {} -> {}", file.source_path.display(), target.display());
            Ok(FileOutcome::Copied { bytes })
        }
        Err(e) => {
            if let Err(cleanup) = remove_if_exists(&temp) {
                log::warn!("{cleanup}");
            }
            Err(e)
        }
    }
}

/// Stream `source` into `temp` and sync it. Returns the bytes written.
fn copy_to_temp<F>(
    source: &Path,
    temp: &Path,
    cancel: &CancelToken,
    on_bytes: &mut F,
) -> Result<u64, TransferError>
where
    F: FnMut(u64),
{
    let mut reader = File::open(source).map_err(|e| TransferError::OpenError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    let mut writer = File::create(temp).map_err(|e| TransferError::CreateError {
        path: temp.to_path_buf(),
        io_error: e,
    })?;

    let copy_error = |e| TransferError::FileCopyError {
        source_path: source.to_path_buf(),
        target_path: temp.to_path_buf(),
        io_error: e,
    };

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut written = 0u64;

    loop {
        if cancel.is_cancelled() {
            return Err(TransferError::Interrupted {
                path: source.to_path_buf(),
            });
        }

        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(copy_error(e)),
        };

        writer.write_all(&buffer[..n]).map_err(copy_error)?;
        written += n as u64;
        on_bytes(written);
    }

    writer.sync_all().map_err(|e| TransferError::SyncError {
        path: temp.to_path_buf(),
        io_error: e,
    })?;

    Ok(written)
}
