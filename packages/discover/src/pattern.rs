//! Concurrent glob pattern resolution.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::DiscoverError;
use crate::fan_out::{ScanOptions, fan_out};

/// Resolve every pattern to the filesystem entries it matches.
///
/// One task runs per pattern. The merged matches are deduplicated and returned
/// sorted. Entries the platform glob cannot read are logged and skipped.
///
/// # Arguments
///
/// * `patterns` - Fully expanded glob patterns
/// * `options` - Scan concurrency settings
/// * `on_progress` - Called with `(patterns_done, patterns_total)` after each pattern
///
/// # Errors
///
/// * [`DiscoverError::InvalidPattern`] if any pattern is malformed
pub fn resolve_patterns<P>(
    patterns: &[String],
    options: &ScanOptions,
    on_progress: P,
) -> Result<Vec<PathBuf>, DiscoverError>
where
    P: Fn(u64, u64) + Send,
{
    log::debug!("Resolving {} pattern(s)", patterns.len());

    let matches = fan_out(patterns, options.threads, |p| glob_pattern(p), on_progress)?;

    let merged: BTreeSet<PathBuf> = matches.into_iter().flatten().collect();

    log::debug!("Patterns matched {} path(s)", merged.len());

    Ok(merged.into_iter().collect())
}

/// Expand a single pattern.
fn glob_pattern(pattern: &str) -> Result<Vec<PathBuf>, DiscoverError> {
    let entries = glob::glob(pattern).map_err(|e| DiscoverError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut matches = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => matches.push(path),
            Err(e) => log::warn!("Skipping unreadable entry {}: {}", e.path().display(), e.error()),
        }
    }

    log::trace!("Pattern {pattern} matched {} path(s)", matches.len());

    Ok(matches)
}
