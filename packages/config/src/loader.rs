//! Catalog file loaders.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::Configuration;

/// Load a catalog, auto-detecting the format based on extension.
///
/// The parsed catalog is validated before it is returned.
///
/// # Arguments
///
/// * `path` - Path to a `.json` or `.toml` catalog
///
/// # Errors
///
/// * If the file extension is not supported
/// * If the file cannot be read
/// * If the file cannot be parsed
/// * If the catalog fails validation
pub fn load_config(path: &Path) -> Result<Configuration, ConfigError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let config = match extension {
        "json" => load_json_config(path)?,
        "toml" => load_toml_config(path)?,
        _ => return Err(ConfigError::UnsupportedFormat(extension.to_string())),
    };

    config.validate().map_err(|message| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    })?;

    log::debug!(
        "Loaded config {:?} with {} source(s)",
        config.description,
        config.sources.len()
    );

    Ok(config)
}

/// Load a JSON catalog without validating it.
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed as JSON
pub fn load_json_config(path: &Path) -> Result<Configuration, ConfigError> {
    log::debug!("Loading JSON config from {}", path.display());

    let content = read(path)?;

    serde_json::from_str(&content).map_err(|e| ConfigError::JsonParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a TOML catalog without validating it.
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed as TOML
pub fn load_toml_config(path: &Path) -> Result<Configuration, ConfigError> {
    log::debug!("Loading TOML config from {}", path.display());

    let content = read(path)?;

    toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_load_json_config() {
        let file = write_temp(
            ".json",
            r#"{
  "description": "Choose a source",
  "sources": [
    {
      "name": "logs",
      "path": ["/data/${env}/*.log"],
      "parameters": [
        {
          "name": "env",
          "description": "Choose environments",
          "choice": [
            {"label": "Production", "value": "prod"},
            {"label": "Development", "value": "dev"}
          ]
        }
      ]
    }
  ]
}"#,
        );

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.description, "Choose a source");
        assert_eq!(config.sources.len(), 1);
        let source = &config.sources[0];
        assert_eq!(source.name, "logs");
        assert_eq!(source.path_templates, vec!["/data/${env}/*.log"]);
        assert_eq!(source.parameters[0].choices[1].label, "Development");
        assert_eq!(source.parameters[0].choices[1].value, "dev");
        assert!(!source.parameters[0].is_resolved());
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_temp(
            ".toml",
            r#"
description = "Choose a source"

[[sources]]
name = "images"
paths = ["/srv/${kind}/*.img"]

[[sources.parameters]]
name = "kind"
choices = [{ label = "Raw", value = "raw" }]
"#,
        );

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.sources[0].path_templates, vec!["/srv/${kind}/*.img"]);
        assert_eq!(config.sources[0].parameters[0].choices.len(), 1);
    }

    #[test]
    fn test_load_config_unsupported_extension() {
        let file = write_temp(".yaml", "description: nope");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref ext) if ext == "yaml"));
    }

    #[test]
    fn test_load_config_malformed_json() {
        let file = write_temp(".json", "{ \"sources\": [ ");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::JsonParseError { .. }));
    }

    #[test]
    fn test_load_config_invalid_catalog() {
        let file = write_temp(".json", r#"{"description": "empty", "sources": []}"#);
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/batch-fetch.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
