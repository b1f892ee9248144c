//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use batch_fetch_discover::{MissingPolicy, ScanOptions};
use batch_fetch_transfer::{DEFAULT_WORKERS, FailurePolicy, TransferOptions};
use clap::Parser;
use clap::builder::RangedU64ValueParser;

/// CLI arguments for batch-fetch.
#[derive(Debug, Parser)]
#[command(
    name = "batch-fetch",
    about = "Copy templated sets of files into a working directory with resumable transfers",
    version
)]
pub struct Args {
    /// Catalog file (defaults to batch-fetch.json next to the executable).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Working directory receiving the files (defaults to the current directory).
    #[arg(long, short = 'd')]
    pub dir: Option<PathBuf>,

    /// Number of concurrent transfers (at least 1).
    #[arg(
        long,
        short = 'w',
        default_value_t = DEFAULT_WORKERS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub workers: usize,

    /// Upper bound on threads used while searching and inspecting files.
    #[arg(long)]
    pub scan_threads: Option<usize>,

    /// Source to use instead of asking.
    #[arg(long)]
    pub source: Option<String>,

    /// Parameter answer, e.g. `env=prod,dev` (can be specified multiple times).
    #[arg(long = "param", short = 'p', value_name = "NAME=KEY[,KEY...]")]
    pub params: Vec<String>,

    /// Fail instead of prompting when an answer is missing.
    #[arg(long)]
    pub non_interactive: bool,

    /// Keep transferring the remaining files when one fails.
    #[arg(long)]
    pub keep_going: bool,

    /// Skip files that disappear before they can be inspected.
    #[arg(long)]
    pub skip_missing: bool,

    /// Disable progress bars (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Parse `--param` values into `name -> keys`.
    ///
    /// Repeating a name appends to its keys.
    ///
    /// # Errors
    ///
    /// * If a value has no `=` or an empty name
    pub fn param_presets(&self) -> Result<BTreeMap<String, Vec<String>>, String> {
        let mut presets: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for raw in &self.params {
            let (name, keys) = raw
                .split_once('=')
                .ok_or_else(|| format!("Invalid --param {raw:?}: expected NAME=KEY[,KEY...]"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("Invalid --param {raw:?}: missing parameter name"));
            }

            presets.entry(name.to_string()).or_default().extend(
                keys.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(String::from),
            );
        }

        Ok(presets)
    }

    /// Settings for the search and inspection stages.
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            threads: self.scan_threads.unwrap_or_else(num_cpus::get).max(1),
            missing: if self.skip_missing {
                MissingPolicy::Skip
            } else {
                MissingPolicy::Fail
            },
        }
    }

    /// Settings for the transfer stage.
    #[must_use]
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            workers: self.workers,
            failure_policy: if self.keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::FailFast
            },
            ..Default::default()
        }
    }

    /// Determine if we should show progress bars.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}
