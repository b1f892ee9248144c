//! End-to-end runs of the library pipeline without the binary.

use std::fs;
use std::path::Path;

use batch_fetch_config::{Choice, Configuration, Parameter, Source};
use batch_fetch_discover::{ScanOptions, collect_metadata, resolve_patterns};
use batch_fetch_expand::{expand_templates, resolve_parameter};
use batch_fetch_transfer::{NoProgress, TransferOptions, TransferReport, run_transfer};
use tempfile::TempDir;

fn logs_source(data: &Path) -> Source {
    Source {
        name: "logs".into(),
        description: "Application logs".into(),
        path_templates: vec![format!("{}/${{env}}/*.log", data.display())],
        parameters: vec![Parameter::new(
            "env",
            "Environment",
            vec![Choice::new("Production", "prod"), Choice::new("Development", "dev")],
        )],
    }
}

fn fetch(source: &Source, selected: &[usize], dest: &Path) -> TransferReport {
    let mut source = source.clone();
    for param in &mut source.parameters {
        resolve_parameter(param, selected).unwrap();
    }

    let patterns = expand_templates(&source.path_templates, &source.parameters).unwrap();
    let scan = ScanOptions::default();
    let paths = resolve_patterns(&patterns, &scan, |_, _| {}).unwrap();
    let files = collect_metadata(&paths, &scan, |_, _| {}).unwrap();

    run_transfer(&files, dest, &TransferOptions::default(), |_| NoProgress, |_| {}).unwrap()
}

#[test]
fn test_fetch_copies_matches_from_every_choice() {
    let data = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::create_dir_all(data.path().join("prod")).unwrap();
    fs::create_dir_all(data.path().join("dev")).unwrap();
    fs::write(data.path().join("prod/a.log"), vec![b'x'; 100]).unwrap();

    let report = fetch(&logs_source(data.path()), &[1, 2], dest.path());

    assert_eq!(report.total, 1);
    assert_eq!(report.copied(), 1);
    assert!(report.is_success());

    let entries: Vec<_> = fs::read_dir(dest.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["a.log".to_string()]);
    assert_eq!(fs::metadata(dest.path().join("a.log")).unwrap().len(), 100);
}

#[test]
fn test_second_fetch_skips_complete_copies() {
    let data = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::create_dir_all(data.path().join("prod")).unwrap();
    fs::write(data.path().join("prod/a.log"), b"first").unwrap();
    fs::write(data.path().join("prod/b.log"), b"second").unwrap();
    let source = logs_source(data.path());

    let first = fetch(&source, &[1], dest.path());
    assert_eq!(first.copied(), 2);

    let second = fetch(&source, &[1], dest.path());
    assert_eq!(second.copied(), 0);
    assert_eq!(second.already_present(), 2);
    assert_eq!(second.bytes_copied(), 0);
}

#[test]
fn test_fetch_replaces_partial_download() {
    let data = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::create_dir_all(data.path().join("dev")).unwrap();
    fs::write(data.path().join("dev/c.log"), b"full contents").unwrap();
    fs::write(dest.path().join("c.log"), b"full").unwrap();
    fs::write(dest.path().join("c.log.dld"), b"stale").unwrap();

    let report = fetch(&logs_source(data.path()), &[2], dest.path());

    assert_eq!(report.copied(), 1);
    assert_eq!(fs::read(dest.path().join("c.log")).unwrap(), b"full contents");
    assert!(!dest.path().join("c.log.dld").exists());
}

#[test]
fn test_catalog_round_trips_through_json() {
    let data = TempDir::new().unwrap();
    let config = Configuration {
        description: "Pick a source".into(),
        sources: vec![logs_source(data.path())],
    };

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"path\""));
    assert!(json.contains("\"choice\""));

    let parsed: Configuration = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
    assert!(parsed.validate().is_ok());
}
