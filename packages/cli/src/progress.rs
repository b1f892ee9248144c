//! Progress bar utilities for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use batch_fetch_config::FileDescriptor;
use batch_fetch_transfer::FileProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Progress bar manager for the pipeline stages.
pub struct ProgressManager {
    multi: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            enabled,
        }
    }

    /// Create a bar counting finished items of a discovery stage.
    ///
    /// If progress is disabled, returns a hidden progress bar.
    #[must_use]
    pub fn create_stage_bar(&self, label: &str, total: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi.add(ProgressBar::new(total));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {prefix:<20} [{bar:25.green/dim}] {pos}/{len}")
                .expect("Invalid progress bar template")
                .progress_chars("━━─"),
        );
        pb.set_prefix(label.to_string());
        pb
    }

    /// Create the byte-level bar owned by one transfer worker.
    #[must_use]
    pub fn create_worker_bar(&self) -> WorkerBar {
        if !self.enabled {
            return WorkerBar(ProgressBar::hidden());
        }

        let pb = self.multi.add(ProgressBar::new(0));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {prefix:<30!} [{bar:25.cyan/dim}] {bytes}/{total_bytes} {bytes_per_sec}")
                .expect("Invalid progress bar template")
                .progress_chars("━━─"),
        );
        WorkerBar(pb)
    }

    /// Create the bar counting transferred files.
    #[must_use]
    pub fn create_total_bar(&self, total: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi.add(ProgressBar::new(total));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {prefix:<30} [{bar:25.green/dim}] {pos}/{len} files")
                .expect("Invalid progress bar template")
                .progress_chars("━━─"),
        );
        pb.set_prefix("Total");
        pb
    }

    /// Clear any active progress bars (for clean output after completion).
    pub fn clear(&self) {
        self.multi.clear().ok();
    }
}

/// Per-worker bar showing the file currently being transferred.
#[derive(Clone)]
pub struct WorkerBar(ProgressBar);

impl FileProgress for WorkerBar {
    fn begin(&mut self, file: &FileDescriptor) {
        self.0.reset();
        self.0.set_length(file.size_bytes);
        self.0.set_prefix(file.display_name.clone());
    }

    fn update(&mut self, bytes: u64) {
        self.0.set_position(bytes);
    }

    fn done(&mut self) {
        self.0.set_prefix("Done");
        self.0.set_length(1);
        self.0.set_position(1);
        self.0.finish();
    }
}
