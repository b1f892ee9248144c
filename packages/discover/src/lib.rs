//! Concurrent file discovery for batch-fetch.
//!
//! Two fan-out/fan-in stages feed the transfer pool:
//!
//! * [`resolve_patterns`] expands glob patterns into matching paths
//! * [`collect_metadata`] stats those paths into [`FileDescriptor`]s
//!
//! Both run one task per input on a bounded `rayon` pool, with a single
//! aggregator draining results over a `crossbeam-channel` and reporting
//! progress per completed task.
//!
//! # Example
//!
//! ```rust,ignore
//! use batch_fetch_discover::{ScanOptions, collect_metadata, resolve_patterns};
//!
//! let options = ScanOptions::default();
//! let paths = resolve_patterns(&patterns, &options, |done, total| {
//!     println!("{done}/{total} patterns");
//! })?;
//! let files = collect_metadata(&paths, &options, |_, _| {})?;
//! ```
//!
//! [`FileDescriptor`]: batch_fetch_config::FileDescriptor

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod fan_out;
mod metadata;
mod pattern;

pub use error::DiscoverError;
pub use fan_out::{MissingPolicy, ScanOptions};
pub use metadata::collect_metadata;
pub use pattern::resolve_patterns;
