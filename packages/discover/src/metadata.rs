//! Concurrent metadata collection for matched paths.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use batch_fetch_config::{FileDescriptor, TEMP_SUFFIX};

use crate::error::DiscoverError;
use crate::fan_out::{MissingPolicy, ScanOptions, fan_out};

/// Stat every path into a [`FileDescriptor`].
///
/// One task runs per path. Directories are skipped with a warning. Paths that
/// cannot be stat'ed fail the stage unless `options.missing` is
/// [`MissingPolicy::Skip`]. Descriptors are returned sorted by source path.
///
/// # Arguments
///
/// * `paths` - Paths produced by glob resolution
/// * `options` - Scan concurrency and missing-file settings
/// * `on_progress` - Called with `(paths_done, paths_total)` after each path
///
/// # Errors
///
/// * [`DiscoverError::Metadata`] if a stat fails under [`MissingPolicy::Fail`]
/// * [`DiscoverError::NameCollision`] if two files share a file name
/// * [`DiscoverError::TempNameCollision`] if a file is named like another file's temporary copy
/// * [`DiscoverError::NonUtf8Name`] if a file name is not valid UTF-8
pub fn collect_metadata<P>(
    paths: &[PathBuf],
    options: &ScanOptions,
    on_progress: P,
) -> Result<Vec<FileDescriptor>, DiscoverError>
where
    P: Fn(u64, u64) + Send,
{
    log::debug!("Collecting metadata for {} path(s)", paths.len());

    let missing = options.missing;
    let stats = fan_out(paths, options.threads, |p| stat_path(p, missing), on_progress)?;

    let mut files: Vec<FileDescriptor> = stats.into_iter().flatten().collect();
    files.sort();

    check_name_collisions(&files)?;

    log::debug!(
        "Collected {} file(s), {} byte(s) total",
        files.len(),
        files.iter().map(|f| f.size_bytes).sum::<u64>()
    );

    Ok(files)
}

fn stat_path(path: &Path, missing: MissingPolicy) -> Result<Option<FileDescriptor>, DiscoverError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if missing == MissingPolicy::Skip => {
            log::warn!("Skipping {}: {e}", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(DiscoverError::Metadata {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if metadata.is_dir() {
        log::warn!("Skipping directory {}", path.display());
        return Ok(None);
    }

    let name = path
        .file_name()
        .ok_or_else(|| DiscoverError::NoFileName(path.to_path_buf()))?
        .to_str()
        .ok_or_else(|| DiscoverError::NonUtf8Name(path.to_path_buf()))?
        .to_string();

    Ok(Some(FileDescriptor::new(path, name, metadata.len())))
}

/// All files land in one flat directory, so names must be unique and no name
/// may equal another file's `<name>.dld` temporary name.
fn check_name_collisions(files: &[FileDescriptor]) -> Result<(), DiscoverError> {
    let mut seen: BTreeMap<&str, &Path> = BTreeMap::new();

    for file in files {
        if let Some(first) = seen.insert(&file.display_name, &file.source_path) {
            return Err(DiscoverError::NameCollision {
                name: file.display_name.clone(),
                first: first.to_path_buf(),
                second: file.source_path.clone(),
            });
        }
    }

    for file in files {
        let Some(base) = file.display_name.strip_suffix(TEMP_SUFFIX) else {
            continue;
        };
        if let Some(owner) = seen.get(base) {
            return Err(DiscoverError::TempNameCollision {
                name: file.display_name.clone(),
                file: file.source_path.clone(),
                owner: owner.to_path_buf(),
            });
        }
    }

    Ok(())
}
