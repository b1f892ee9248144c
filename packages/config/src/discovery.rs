//! Default catalog location.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// File name looked up when no catalog is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "batch-fetch.json";

/// Candidate catalog paths, in lookup order.
///
/// 1. `batch-fetch.json` next to the running executable
/// 2. `batch-fetch/batch-fetch.json` in the user config directory
#[must_use]
pub fn default_config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    match env::current_exe() {
        Ok(exe) => {
            if let Some(dir) = exe.parent() {
                candidates.push(dir.join(DEFAULT_CONFIG_FILE));
            }
        }
        Err(e) => log::warn!("Unable to locate executable: {e}"),
    }

    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("batch-fetch").join(DEFAULT_CONFIG_FILE));
    }

    candidates
}

/// Pick the catalog to load.
///
/// An explicit path always wins, even if it does not exist (loading will then
/// report the read error). Otherwise the first existing default candidate is used.
///
/// # Errors
///
/// * [`ConfigError::NotFound`] if no explicit path was given and no candidate exists
pub fn locate_config(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    find_existing(default_config_candidates())
}

fn find_existing(candidates: Vec<PathBuf>) -> Result<PathBuf, ConfigError> {
    for candidate in &candidates {
        log::debug!("Looking for config at {}", candidate.display());
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }

    Err(ConfigError::NotFound(candidates))
}
