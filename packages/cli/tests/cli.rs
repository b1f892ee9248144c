//! Runs of the built binary in non-interactive mode.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Fixture {
    root: TempDir,
}

impl Fixture {
    /// A catalog with one `logs` source over `data/${env}/*.log`.
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("data/prod")).unwrap();
        fs::create_dir_all(root.path().join("data/dev")).unwrap();
        fs::create_dir_all(root.path().join("work")).unwrap();
        fs::write(root.path().join("data/prod/a.log"), vec![b'x'; 100]).unwrap();

        let fixture = Self { root };
        let template = format!("{}/data/${{env}}/*.log", fixture.root.path().display());
        fixture.write_config(&template);
        fixture
    }

    fn write_config(&self, template: &str) {
        let config = serde_json::json!({
            "description": "Choose a source",
            "sources": [{
                "name": "logs",
                "description": "Application logs",
                "path": [template],
                "parameters": [{
                    "name": "env",
                    "description": "Environment",
                    "choice": [
                        { "label": "Production", "value": "prod" },
                        { "label": "Development", "value": "dev" }
                    ]
                }]
            }]
        });
        fs::write(self.config(), serde_json::to_vec_pretty(&config).unwrap()).unwrap();
    }

    fn config(&self) -> PathBuf {
        self.root.path().join("batch-fetch.json")
    }

    fn work(&self) -> PathBuf {
        self.root.path().join("work")
    }

    fn run(&self, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_batch-fetch"))
            .arg("--config")
            .arg(self.config())
            .arg("--dir")
            .arg(self.work())
            .args(["--non-interactive", "--no-progress"])
            .args(extra)
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_fetch_from_all_environments() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--source", "logs", "--param", "env=prod,dev"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(file_names(&fixture.work()), vec!["a.log"]);
    assert_eq!(fs::metadata(fixture.work().join("a.log")).unwrap().len(), 100);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Downloading files."));
}

#[test]
fn test_second_run_is_idempotent() {
    let fixture = Fixture::new();

    let first = fixture.run(&["--source", "logs", "--param", "env=prod"]);
    assert!(first.status.success());
    let second = fixture.run(&["--source", "logs", "--param", "env=prod"]);
    assert!(second.status.success());

    assert_eq!(file_names(&fixture.work()), vec!["a.log"]);
    assert!(String::from_utf8_lossy(&second.stdout).contains("1 already present"));
}

#[test]
fn test_choice_by_number() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--source", "1", "--param", "env=1"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(file_names(&fixture.work()), vec!["a.log"]);
}

#[test]
fn test_no_matches_finishes_cleanly() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--source", "logs", "--param", "env=dev"]);

    assert!(output.status.success());
    assert!(file_names(&fixture.work()).is_empty());
}

#[test]
fn test_invalid_pattern_fails_without_copying() {
    let fixture = Fixture::new();
    let template = format!("{}/data/${{env}}/***.log", fixture.root.path().display());
    fixture.write_config(&template);

    let output = fixture.run(&["--source", "logs", "--param", "env=prod"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("is invalid"));
    assert!(file_names(&fixture.work()).is_empty());
}

#[test]
fn test_unknown_source_fails() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--source", "metrics", "--param", "env=prod"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown value \"metrics\""));
}

#[test]
fn test_missing_answer_fails_in_non_interactive_mode() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--source", "logs"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("non-interactive"));
}

#[test]
fn test_missing_working_dir_fails() {
    let fixture = Fixture::new();

    let output = Command::new(env!("CARGO_BIN_EXE_batch-fetch"))
        .arg("--config")
        .arg(fixture.config())
        .arg("--dir")
        .arg(fixture.root.path().join("absent"))
        .args(["--non-interactive", "--no-progress", "--source", "logs", "--param", "env=prod"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not a directory"));
}

#[test]
fn test_zero_workers_fails_before_searching() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--source", "logs", "--param", "env=prod", "--workers", "0"]);

    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Looking for files"));
    assert!(file_names(&fixture.work()).is_empty());
}

#[test]
fn test_abort_key_reports_interruption_on_stderr() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--source", "logs", "--param", "env=0"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Interrupted by user"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Interrupted by user"));
    assert!(file_names(&fixture.work()).is_empty());
}

#[test]
fn test_partial_download_name_clash_fails() {
    let fixture = Fixture::new();
    fs::write(fixture.root.path().join("data/prod/a.log.dld"), b"committed").unwrap();
    let template = format!("{}/data/${{env}}/*", fixture.root.path().display());
    fixture.write_config(&template);

    let output = fixture.run(&["--source", "logs", "--param", "env=prod"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("partial download"));
    assert!(file_names(&fixture.work()).is_empty());
}
