//! Error types for parameter resolution and expansion.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use batch_fetch_config::ConfigError;
use thiserror::Error;

/// Errors that can occur while turning templates into glob patterns.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// A selected index does not name a choice.
    #[error("Choice {index} is out of range for parameter {parameter} (1..={count})")]
    ChoiceOutOfRange {
        /// Parameter being resolved.
        parameter: String,
        /// Offending 1-based index.
        index: usize,
        /// Number of available choices.
        count: usize,
    },

    /// A parameter was read before it was resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A pattern still contains a placeholder after every parameter was applied.
    #[error("Pattern {pattern} still contains placeholder {placeholder}")]
    UnresolvedPlaceholder {
        /// The expanded pattern.
        pattern: String,
        /// The leftover `${...}` text.
        placeholder: String,
    },
}
