//! Error types for catalog loading.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or using the source catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Unable to read config file {}: {source}", path.display())]
    ReadError {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON configuration.
    #[error("Unable to parse config file {}: {source}", path.display())]
    JsonParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Unable to parse config file {}: {source}", path.display())]
    TomlParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// Unsupported configuration format.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The catalog parsed but is not usable.
    #[error("Invalid config {}: {message}", path.display())]
    Invalid {
        /// Path to the offending file.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// No configuration file was given and none was found in the default locations.
    #[error("No config file found (looked in: {})", format_candidates(.0))]
    NotFound(Vec<PathBuf>),

    /// Resolved values of a parameter were read before the parameter was resolved.
    #[error("Unresolved parameter {0}")]
    UnresolvedParameter(String),

    /// A parameter was given values a second time.
    #[error("Parameter {0} is already resolved")]
    AlreadyResolved(String),
}

fn format_candidates(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
