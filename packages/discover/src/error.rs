//! Error types for the discovery stages.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while finding and inspecting files.
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// The platform glob implementation rejected a pattern.
    #[error("Resulting pattern {pattern} is invalid: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// The underlying pattern error.
        #[source]
        source: glob::PatternError,
    },

    /// Failed to stat a matched path.
    #[error("Failed to get metadata for {}: {source}", path.display())]
    Metadata {
        /// The matched path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A matched path has no final component to name the copy after.
    #[error("Cannot derive a file name from {}", .0.display())]
    NoFileName(PathBuf),

    /// Two matched files would land on the same destination name.
    #[error("Files {} and {} would both be saved as {name}", first.display(), second.display())]
    NameCollision {
        /// Shared destination name.
        name: String,
        /// First file with that name.
        first: PathBuf,
        /// Second file with that name.
        second: PathBuf,
    },

    /// A matched file is named like another file's in-progress copy.
    #[error(
        "File {} would be deleted as the partial download of {}; rename one of them",
        file.display(),
        owner.display()
    )]
    TempNameCollision {
        /// Name shared with the in-progress copy.
        name: String,
        /// The file carrying the temporary name.
        file: PathBuf,
        /// The file whose in-progress copy uses that name.
        owner: PathBuf,
    },

    /// A matched file name is not valid UTF-8.
    #[error("File name of {} is not valid UTF-8", .0.display())]
    NonUtf8Name(PathBuf),

    /// The scan thread pool could not be started.
    #[error("Failed to start scan threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
