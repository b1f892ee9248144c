//! Source catalog for batch-fetch.
//!
//! This crate holds the catalog model (sources, parameters, choices), its
//! loading from disk, and the [`FileDescriptor`] passed between the later
//! pipeline stages.
//!
//! # Supported Config Formats
//!
//! * JSON (`batch-fetch.json`)
//! * TOML (`*.toml`)
//!
//! # Example
//!
//! ```rust,ignore
//! use batch_fetch_config::{load_config, locate_config};
//!
//! let path = locate_config(None)?;
//! let config = load_config(&path)?;
//! for source in &config.sources {
//!     println!("{}: {} template(s)", source.name, source.path_templates.len());
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod loader;
mod select;
mod types;

pub use discovery::{DEFAULT_CONFIG_FILE, default_config_candidates, locate_config};
pub use error::ConfigError;
pub use loader::{load_config, load_json_config, load_toml_config};
pub use select::Selectable;
pub use types::{
    Choice, Configuration, FileDescriptor, Parameter, Resolution, Source, TEMP_SUFFIX,
};
