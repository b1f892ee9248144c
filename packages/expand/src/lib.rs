//! Parameter resolution and path template expansion for batch-fetch.
//!
//! Turns a source's `${parameter}` templates plus the user's choices into the
//! flat list of glob patterns searched by the discovery stage.
//!
//! # Example
//!
//! ```rust,ignore
//! use batch_fetch_expand::{expand_templates, resolve_parameter};
//!
//! for param in &mut source.parameters {
//!     resolve_parameter(param, &[1, 2])?;
//! }
//! let patterns = expand_templates(&source.path_templates, &source.parameters)?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod expand;
mod resolve;

pub use error::ExpandError;
pub use expand::expand_templates;
pub use resolve::resolve_parameter;
