//! # stubfix-core
//!
//! Core framework for post-processing generated Python type-stub files.
//!
//! This crate provides the foundational traits and types for building
//! stub transforms. It includes:
//!
//! - [`Transform`] trait for per-file text rewrites
//! - [`Runner`] for discovering files and applying transforms to them
//! - [`replace_with_backup`] for crash-safe in-place file replacement
//! - [`prune_tree`] for stripping non-stub files out of a generated tree
//!
//! ## Example
//!
//! ```ignore
//! use stubfix_core::Runner;
//!
//! let runner = Runner::builder()
//!     .root("./stubs")
//!     .transform(MyTransform::new())
//!     .build()?;
//!
//! let report = runner.run()?;
//! println!("{} file(s) changed", report.files_changed());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backup;
mod config;
mod context;
mod prune;
mod runner;
mod transform;
mod types;

/// Utility functions shared by transforms and the CLI.
pub mod utils;

pub use backup::{backup_path, replace_with, replace_with_backup, BackupError, DEFAULT_BACKUP_SUFFIX};
pub use config::{Config, ConfigError, PruneConfig, RunnerConfig, TransformConfig};
pub use context::FileContext;
pub use prune::{prune_tree, PruneError, PruneReport};
pub use runner::{Runner, RunnerBuilder, RunnerError};
pub use transform::{Transform, TransformBox};
pub use types::{Change, Location, Rewrite, RunReport};
