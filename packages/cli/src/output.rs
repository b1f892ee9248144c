//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use batch_fetch_transfer::TransferReport;
use colored::Colorize;

/// Print a header message.
pub fn print_header(message: &str) {
    println!("\n{} {}\n", "📦", message.bold());
}

/// Print the resolved start parameters.
pub fn print_start_params(working_dir: &Path, config_file: &Path) {
    log::info!("Working dir: {}", working_dir.display());
    log::info!("Config file: {}", config_file.display());
    println!("Working dir: {}", working_dir.display().to_string().cyan());
    println!("Config file: {}", config_file.display().to_string().cyan());
}

/// Print the chosen source.
pub fn print_source(name: &str) {
    println!("Source {} is chosen", name.yellow());
}

/// Print the values a parameter resolved to.
pub fn print_parameter(name: &str, values: &[String]) {
    println!("  {} {} = {}", "•".dimmed(), name, values.join(", ").yellow());
}

/// Print the headline of a pipeline stage.
pub fn print_stage(message: &str) {
    println!("\n{}", message.bold());
}

/// Print the outcome of the transfer stage.
pub fn print_summary(report: &TransferReport) {
    println!(
        "\n{} {} of {} file{} complete ({} copied, {} already present, {} bytes transferred)",
        if report.is_success() {
            "✅".to_string()
        } else {
            "Warning:".yellow().bold().to_string()
        },
        report.completed(),
        report.total,
        if report.total == 1 { "" } else { "s" },
        report.copied(),
        report.already_present(),
        report.bytes_copied()
    );

    for (file, error) in report.failures() {
        eprintln!("  {} {}: {}", "✗".red(), file.display_name, error);
    }
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
