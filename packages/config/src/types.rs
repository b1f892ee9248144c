//! Catalog types for batch-fetch.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A selectable option of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Display text.
    pub label: String,
    /// Substitution text.
    pub value: String,
}

impl Choice {
    /// Create a new choice.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Resolution state of a [`Parameter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Resolution {
    /// No values have been chosen yet.
    #[default]
    Unresolved,
    /// Values chosen by the user, in selection order.
    Resolved(Vec<String>),
}

/// A named substitution variable with a fixed menu of choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Placeholder name, referenced in templates as `${name}`.
    pub name: String,

    /// Prompt shown when asking for this parameter.
    #[serde(default)]
    pub description: String,

    /// Allowed choices.
    #[serde(rename = "choice", alias = "choices", default)]
    pub choices: Vec<Choice>,

    #[serde(skip)]
    resolution: Resolution,
}

impl Parameter {
    /// Create an unresolved parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            choices,
            resolution: Resolution::Unresolved,
        }
    }

    /// The `${name}` placeholder this parameter substitutes.
    #[must_use]
    pub fn placeholder(&self) -> String {
        format!("${{{}}}", self.name)
    }

    /// Record the resolved values.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::AlreadyResolved`] if values were already recorded
    pub fn resolve(&mut self, values: Vec<String>) -> Result<(), ConfigError> {
        if self.is_resolved() {
            return Err(ConfigError::AlreadyResolved(self.name.clone()));
        }
        log::debug!("Parameter {} resolved to {:?}", self.name, values);
        self.resolution = Resolution::Resolved(values);
        Ok(())
    }

    /// Whether values have been chosen.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved(_))
    }

    /// Current resolution state.
    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Resolved values.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::UnresolvedParameter`] if the parameter was never resolved
    pub fn resolved(&self) -> Result<&[String], ConfigError> {
        match &self.resolution {
            Resolution::Resolved(values) => Ok(values),
            Resolution::Unresolved => Err(ConfigError::UnresolvedParameter(self.name.clone())),
        }
    }
}

/// A named family of files described by path templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Display name.
    pub name: String,

    /// Optional longer description.
    #[serde(default)]
    pub description: String,

    /// Glob templates containing `${parameter}` placeholders.
    #[serde(rename = "path", alias = "paths", default)]
    pub path_templates: Vec<String>,

    /// Parameters to resolve before expansion, in order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// The whole source catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Prompt shown when choosing a source.
    #[serde(default)]
    pub description: String,

    /// Available sources.
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl Configuration {
    /// Check that the catalog can drive a run.
    ///
    /// # Errors
    ///
    /// * A message describing the first problem found
    pub fn validate(&self) -> Result<(), String> {
        if self.sources.is_empty() {
            return Err("no sources defined".to_string());
        }

        for source in &self.sources {
            if source.path_templates.is_empty() {
                return Err(format!("source '{}' has no path templates", source.name));
            }

            let mut seen = BTreeSet::new();
            for param in &source.parameters {
                if !seen.insert(param.name.as_str()) {
                    return Err(format!(
                        "source '{}' declares parameter '{}' more than once",
                        source.name, param.name
                    ));
                }
                if param.choices.is_empty() {
                    return Err(format!(
                        "parameter '{}' of source '{}' has no choices",
                        param.name, source.name
                    ));
                }
            }
        }

        Ok(())
    }

    /// Find a source by name.
    #[must_use]
    pub fn source(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name == name)
    }
}

/// Suffix of in-progress copies. A finished copy is always renamed away from it.
pub const TEMP_SUFFIX: &str = ".dld";

/// One file to transfer, as observed at stat time.
///
/// `size_bytes` is the size a destination copy must match to count as complete.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileDescriptor {
    /// Where the file lives.
    pub source_path: PathBuf,
    /// File name used in the destination directory.
    pub display_name: String,
    /// Size observed when the file was stat'ed.
    pub size_bytes: u64,
}

impl FileDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(source_path: impl Into<PathBuf>, display_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            source_path: source_path.into(),
            display_name: display_name.into(),
            size_bytes,
        }
    }

    /// Name of the in-progress copy in the destination directory.
    #[must_use]
    pub fn temp_name(&self) -> String {
        format!("{}{TEMP_SUFFIX}", self.display_name)
    }
}
