//! batch-fetch CLI entry point.
//!
//! Picks a catalog source, resolves its parameters and copies every matching
//! file into the working directory with resumable transfers.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod interactive;
mod output;
mod progress;

use std::collections::BTreeMap;
use std::env;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use args::Args;
use batch_fetch_config::{Configuration, Source, load_config, locate_config};
use batch_fetch_discover::{collect_metadata, resolve_patterns};
use batch_fetch_expand::{expand_templates, resolve_parameter};
use batch_fetch_transfer::run_transfer;
use interactive::{Chooser, Selection};
use progress::ProgressManager;

/// How a run ended without an error.
enum RunStatus {
    Finished,
    Interrupted,
}

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    match run(&args) {
        Ok(RunStatus::Finished) => {}
        Ok(RunStatus::Interrupted) => {
            eprintln!("{}", "Interrupted by user".yellow());
            std::process::exit(1);
        }
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<RunStatus, Box<dyn Error>> {
    let working_dir = resolve_working_dir(args)?;
    let config_path = locate_config(args.config.as_deref())?;

    output::print_header("Batch Fetch");
    output::print_start_params(&working_dir, &config_path);

    let config = load_config(&config_path)?;
    let chooser = Chooser::new(args.non_interactive);
    let presets = args.param_presets()?;

    let Some(mut source) = choose_source(&config, chooser, args.source.as_deref())? else {
        return Ok(RunStatus::Interrupted);
    };
    output::print_source(&source.name);

    if !resolve_parameters(&mut source, chooser, &presets)? {
        return Ok(RunStatus::Interrupted);
    }

    let patterns = expand_templates(&source.path_templates, &source.parameters)?;
    let scan = args.scan_options();
    let progress = ProgressManager::new(args.should_show_progress());

    output::print_stage(&format!(
        "Looking for files. Introspecting {} pattern(s).",
        patterns.len()
    ));
    let bar = progress.create_stage_bar("Processing folders", patterns.len() as u64);
    let paths = resolve_patterns(&patterns, &scan, |done, _| bar.set_position(done));
    bar.finish();
    let paths = paths?;

    output::print_stage(&format!("Collecting info for {} files.", paths.len()));
    let bar = progress.create_stage_bar("Processing files", paths.len() as u64);
    let files = collect_metadata(&paths, &scan, |done, _| bar.set_position(done));
    bar.finish();
    let files = files?;

    if files.is_empty() {
        progress.clear();
        println!("No files matched. Nothing to download.");
        return Ok(RunStatus::Finished);
    }

    output::print_stage("Downloading files.");
    let options = args.transfer_options();
    let worker_bars: Vec<_> = (0..options.workers)
        .map(|_| progress.create_worker_bar())
        .collect();
    let total = progress.create_total_bar(files.len() as u64);

    let report = run_transfer(
        &files,
        &working_dir,
        &options,
        |i| worker_bars[i].clone(),
        |p| total.set_position(p.files_completed),
    );
    total.finish();
    progress.clear();
    let report = report?;

    output::print_summary(&report);

    if !report.is_success() {
        return Err(format!(
            "{} of {} file(s) failed to transfer",
            report.failures().count(),
            report.total
        )
        .into());
    }

    Ok(RunStatus::Finished)
}

/// Resolve `--dir` against the current directory and check it exists.
fn resolve_working_dir(args: &Args) -> Result<PathBuf, Box<dyn Error>> {
    let cwd = env::current_dir()?;
    let dir = match &args.dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    };
    let dir = path_clean::clean(&dir);

    if !dir.is_dir() {
        return Err(format!("Working directory {} is not a directory", dir.display()).into());
    }

    Ok(dir)
}

/// Pick the source to fetch. Returns `None` if the user aborted.
fn choose_source(
    config: &Configuration,
    chooser: Chooser,
    preset: Option<&str>,
) -> Result<Option<Source>, Box<dyn Error>> {
    let preset = preset.map(|name| vec![name.to_string()]);

    let index = match chooser.choose(config, false, "source", preset.as_deref())? {
        Selection::Abort => return Ok(None),
        Selection::Chosen(indices) => indices.first().copied().ok_or("No source chosen")?,
    };

    let source = index
        .checked_sub(1)
        .and_then(|i| config.sources.get(i))
        .ok_or_else(|| format!("Source number {index} does not exist"))?;

    log::debug!("Chose source {}", source.name);
    Ok(Some(source.clone()))
}

/// Resolve every parameter of `source` in declaration order.
///
/// Returns `false` if the user aborted.
fn resolve_parameters(
    source: &mut Source,
    chooser: Chooser,
    presets: &BTreeMap<String, Vec<String>>,
) -> Result<bool, Box<dyn Error>> {
    for param in &mut source.parameters {
        let preset = presets.get(&param.name).map(Vec::as_slice);

        let indices = match chooser.choose(&*param, true, &param.name, preset)? {
            Selection::Abort => return Ok(false),
            Selection::Chosen(indices) => indices,
        };

        resolve_parameter(param, &indices)?;
        output::print_parameter(&param.name, param.resolved()?);
    }

    for name in presets.keys() {
        if !source.parameters.iter().any(|p| &p.name == name) {
            log::warn!("Source {} has no parameter {}", source.name, name);
        }
    }

    Ok(true)
}
